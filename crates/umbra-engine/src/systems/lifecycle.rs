//! Per-subject shadow lifecycle.
//!
//! `NoShadow → PendingCreate → Active → PendingDelete → NoShadow`. An active
//! shadow whose image (or, for silhouettes, frame) changed goes back to
//! `PendingCreate` and is rebuilt from scratch.

use crate::api::types::NodeId;
use crate::assets::config::GlobalShadowConfig;
use crate::assets::layout::measure_bitmap;
use crate::assets::registry::SheetRegistry;
use crate::components::layer::RenderLayer;
use crate::components::profile::{ShadowProfile, ShadowShape};
use crate::components::subject::Subject;
use crate::components::transform::FrameRect;
use crate::core::toggles::ShadowToggles;
use crate::renderer::traits::ShadowLayer;
use super::bitmap::{build_bitmap, FrameSource};
use super::geometry::{compute_transform, ShadowSprite};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    NoShadow,
    PendingCreate,
    Active,
    PendingDelete,
}

/// A subject's resolved profile plus the node drawing it.
#[derive(Debug, Clone)]
pub struct ShadowSlot {
    pub profile: ShadowProfile,
    pub state: LifecycleState,
    node: Option<NodeId>,
    /// Image name and frame the current bitmap was built from.
    source: Option<(String, FrameRect)>,
}

impl ShadowSlot {
    /// New slot; creation is requested right away if the profile casts.
    pub fn new(profile: ShadowProfile) -> Self {
        let mut slot = Self {
            profile,
            state: LifecycleState::NoShadow,
            node: None,
            source: None,
        };
        slot.arise();
        slot
    }

    /// Request (re)creation. No-op for shape None.
    pub fn arise(&mut self) {
        if !self.profile.shape.is_none() {
            self.state = LifecycleState::PendingCreate;
        }
    }

    /// Request deletion.
    pub fn clear(&mut self) {
        if self.node.is_some() || self.state != LifecycleState::NoShadow {
            self.state = LifecycleState::PendingDelete;
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Drop the node and mark the slot for re-creation, used when the host
    /// layer goes away under a live shadow.
    pub(crate) fn detach(&mut self, layer: &mut dyn ShadowLayer) {
        if let Some(node) = self.node.take() {
            layer.detach(node);
        }
        self.source = None;
        if self.state == LifecycleState::Active {
            self.state = LifecycleState::PendingCreate;
        }
    }

    fn stale(&self, image_name: &str, frame: FrameRect) -> bool {
        match &self.source {
            Some((image, built_frame)) => {
                image != image_name
                    || (self.profile.shape == ShadowShape::Silhouette && *built_frame != frame)
            }
            None => true,
        }
    }
}

/// Shared inputs of one tick.
pub struct TickEnv<'a> {
    pub sheets: &'a SheetRegistry,
    pub toggles: &'a ShadowToggles,
    pub config: &'a GlobalShadowConfig,
}

/// Advance one subject by a frame: measure, create/delete, then update.
pub fn tick_subject(subject: &mut Subject, env: &TickEnv, layer: &mut dyn ShadowLayer) {
    subject.transform.bitmap = measure_bitmap(subject, env.sheets.dimensions(&subject.image_name));

    let Some(slot) = subject.shadow.as_mut() else {
        return;
    };

    if slot.state == LifecycleState::Active && slot.stale(&subject.image_name, subject.transform.frame) {
        slot.state = LifecycleState::PendingCreate;
    }

    let state = slot.state;
    match state {
        LifecycleState::PendingCreate => create(subject, env, layer),
        LifecycleState::PendingDelete => delete(slot, layer),
        LifecycleState::Active | LifecycleState::NoShadow => {}
    }

    update(subject, env, layer);
}

fn create(subject: &mut Subject, env: &TickEnv, layer: &mut dyn ShadowLayer) {
    let id = subject.id;
    let Some(slot) = subject.shadow.as_mut() else {
        return;
    };
    if slot.profile.shape.is_none() {
        delete(slot, layer);
        return;
    }
    if !layer.is_ready() {
        log::trace!("shadow {:?}: layer not ready", id);
        return;
    }
    let Some(size) = subject.transform.bitmap.filter(|b| !b.is_empty()) else {
        log::trace!("shadow {:?}: bitmap size unknown", id);
        return;
    };

    let frame = subject.transform.frame;
    let source = env.sheets.get(&subject.image_name).map(|sheet| FrameSource {
        sheet,
        frame,
        bush_depth: subject.transform.bush_depth,
    });
    let Some(bitmap) = build_bitmap(&slot.profile, size, source) else {
        log::trace!("shadow {:?}: nothing to draw yet for {:?}", id, subject.image_name);
        return;
    };

    if let Some(old) = slot.node.take() {
        layer.detach(old);
    }
    slot.node = Some(layer.attach(bitmap, RenderLayer::Shadows));
    slot.source = Some((subject.image_name.clone(), frame));
    slot.state = LifecycleState::Active;
    log::debug!("shadow {:?}: created {:?}", id, slot.profile.shape);
}

fn delete(slot: &mut ShadowSlot, layer: &mut dyn ShadowLayer) {
    if let Some(node) = slot.node.take() {
        layer.detach(node);
    }
    slot.source = None;
    slot.state = LifecycleState::NoShadow;
}

fn update(subject: &Subject, env: &TickEnv, layer: &mut dyn ShadowLayer) {
    let Some(slot) = subject.shadow.as_ref() else {
        return;
    };
    let Some(node) = slot.node else {
        return;
    };
    let sprite = compute_transform(&slot.profile, &subject.transform, env.toggles, env.config)
        .unwrap_or_else(|| ShadowSprite::hidden(slot.profile.shape));
    layer.update(node, &sprite);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use image::RgbaImage;
    use crate::api::types::{EventId, ShadowContext, SubjectId};
    use crate::components::profile::{ShadowCategory, ShadowOverride};
    use crate::components::subject::SubjectKind;
    use crate::renderer::instance::ShadowBuffer;
    use crate::systems::resolver::ResolveContext;

    fn profile(shape: ShadowShape) -> ShadowProfile {
        let config = GlobalShadowConfig::default();
        let scene = ShadowOverride::default();
        ResolveContext::new(&config, ShadowContext::Map, &scene)
            .build(ShadowCategory::Character, shape, &ShadowOverride::default())
    }

    fn sheets() -> SheetRegistry {
        let mut sheets = SheetRegistry::new();
        // 576×384 character set: 48×48 frames.
        sheets.insert("People1", RgbaImage::from_pixel(576, 384, image::Rgba([200, 100, 50, 255])));
        sheets.insert("People2", RgbaImage::from_pixel(576, 384, image::Rgba([200, 100, 50, 255])));
        sheets
    }

    fn subject(shape: ShadowShape) -> Subject {
        let mut s = Subject::new(SubjectId(1), SubjectKind::Event { event_id: EventId(1), tile: false })
            .with_image("People1")
            .with_pos(Vec2::new(100.0, 100.0))
            .with_frame(FrameRect::new(0.0, 0.0, 48.0, 48.0));
        s.shadow = Some(ShadowSlot::new(profile(shape)));
        s
    }

    fn ready_buffer() -> ShadowBuffer {
        let mut buf = ShadowBuffer::new();
        buf.set_ready(true);
        buf
    }

    #[test]
    fn new_slot_requests_creation() {
        assert_eq!(ShadowSlot::new(profile(ShadowShape::Ellipse)).state, LifecycleState::PendingCreate);
        assert_eq!(ShadowSlot::new(profile(ShadowShape::None)).state, LifecycleState::NoShadow);
    }

    #[test]
    fn create_then_update_same_tick() {
        let sheets = sheets();
        let toggles = ShadowToggles::new();
        let config = GlobalShadowConfig::default();
        let env = TickEnv { sheets: &sheets, toggles: &toggles, config: &config };
        let mut buf = ready_buffer();
        let mut s = subject(ShadowShape::Silhouette);

        tick_subject(&mut s, &env, &mut buf);

        let slot = s.shadow.as_ref().unwrap();
        assert_eq!(slot.state, LifecycleState::Active);
        let node = slot.node().unwrap();
        let inst = buf.instance(node).unwrap();
        assert_eq!(inst.visible, 1.0);
        assert!(inst.x > 100.0);
        assert_eq!(buf.bitmap(node).unwrap().dimensions(), (144, 144));
    }

    #[test]
    fn creation_deferred_until_ready() {
        let sheets = sheets();
        let toggles = ShadowToggles::new();
        let config = GlobalShadowConfig::default();
        let env = TickEnv { sheets: &sheets, toggles: &toggles, config: &config };
        let mut buf = ShadowBuffer::new();
        let mut s = subject(ShadowShape::Ellipse);

        tick_subject(&mut s, &env, &mut buf);
        assert_eq!(s.shadow.as_ref().unwrap().state, LifecycleState::PendingCreate);
        assert_eq!(buf.node_count(), 0);

        buf.set_ready(true);
        tick_subject(&mut s, &env, &mut buf);
        assert_eq!(s.shadow.as_ref().unwrap().state, LifecycleState::Active);
    }

    #[test]
    fn creation_deferred_until_sheet_loaded() {
        let sheets = SheetRegistry::new();
        let toggles = ShadowToggles::new();
        let config = GlobalShadowConfig::default();
        let env = TickEnv { sheets: &sheets, toggles: &toggles, config: &config };
        let mut buf = ready_buffer();
        let mut s = subject(ShadowShape::Silhouette);

        tick_subject(&mut s, &env, &mut buf);
        assert_eq!(s.shadow.as_ref().unwrap().state, LifecycleState::PendingCreate);
        assert!(s.transform.bitmap.is_none());
        assert_eq!(buf.node_count(), 0);
    }

    #[test]
    fn frame_change_rebuilds_silhouette_only() {
        let sheets = sheets();
        let toggles = ShadowToggles::new();
        let config = GlobalShadowConfig::default();
        let env = TickEnv { sheets: &sheets, toggles: &toggles, config: &config };
        let mut buf = ready_buffer();

        let mut sil = subject(ShadowShape::Silhouette);
        tick_subject(&mut sil, &env, &mut buf);
        let first = sil.shadow.as_ref().unwrap().node().unwrap();
        sil.transform.frame = FrameRect::new(48.0, 0.0, 48.0, 48.0);
        tick_subject(&mut sil, &env, &mut buf);
        let second = sil.shadow.as_ref().unwrap().node().unwrap();
        assert_ne!(first, second);
        assert!(buf.bitmap(first).is_none());

        let mut ell = subject(ShadowShape::Ellipse);
        tick_subject(&mut ell, &env, &mut buf);
        let first = ell.shadow.as_ref().unwrap().node().unwrap();
        ell.transform.frame = FrameRect::new(48.0, 0.0, 48.0, 48.0);
        tick_subject(&mut ell, &env, &mut buf);
        assert_eq!(ell.shadow.as_ref().unwrap().node(), Some(first));

        ell.image_name = "People2".into();
        tick_subject(&mut ell, &env, &mut buf);
        assert_ne!(ell.shadow.as_ref().unwrap().node(), Some(first));
    }

    #[test]
    fn clear_is_idempotent() {
        let sheets = sheets();
        let toggles = ShadowToggles::new();
        let config = GlobalShadowConfig::default();
        let env = TickEnv { sheets: &sheets, toggles: &toggles, config: &config };
        let mut buf = ready_buffer();
        let mut s = subject(ShadowShape::Ellipse);
        tick_subject(&mut s, &env, &mut buf);

        s.shadow.as_mut().unwrap().clear();
        tick_subject(&mut s, &env, &mut buf);
        s.shadow.as_mut().unwrap().clear();
        tick_subject(&mut s, &env, &mut buf);

        let slot = s.shadow.as_ref().unwrap();
        assert_eq!(slot.state, LifecycleState::NoShadow);
        assert!(slot.node().is_none());
        assert_eq!(buf.node_count(), 0);
        assert_eq!(buf.take_detached().len(), 1);
    }

    #[test]
    fn hidden_toggle_reaches_instance() {
        let sheets = sheets();
        let toggles = ShadowToggles { hidden: true, ..Default::default() };
        let config = GlobalShadowConfig::default();
        let env = TickEnv { sheets: &sheets, toggles: &toggles, config: &config };
        let mut buf = ready_buffer();
        let mut s = subject(ShadowShape::Ellipse);
        tick_subject(&mut s, &env, &mut buf);

        let node = s.shadow.as_ref().unwrap().node().unwrap();
        assert_eq!(buf.instance(node).unwrap().visible, 0.0);
    }
}
