//! Shadow profile resolution.
//!
//! Layering, later wins and only for fields actually set:
//! global default → scene (map) override → entity annotation →
//! alternate annotation → runtime command.

use glam::Vec2;
use crate::api::types::ShadowContext;
use crate::assets::config::GlobalShadowConfig;
use crate::assets::layout::OBJECT_PREFIX;
use crate::components::profile::{ShadowCategory, ShadowOverride, ShadowProfile, ShadowShape};
use crate::components::subject::{Subject, SubjectKind};

/// Classify a subject. Precedence: party → object sheet → tile →
/// vehicle → battler → generic character.
pub fn classify(subject: &Subject) -> ShadowCategory {
    match subject.kind {
        SubjectKind::Player | SubjectKind::Follower { .. } => ShadowCategory::Player,
        SubjectKind::Event { .. } | SubjectKind::Vehicle(_)
            if subject.image_name.starts_with(OBJECT_PREFIX) =>
        {
            ShadowCategory::Object
        }
        SubjectKind::Event { tile: true, .. } => ShadowCategory::Tile,
        SubjectKind::Vehicle(_) => ShadowCategory::Vehicle,
        SubjectKind::Enemy { .. } => ShadowCategory::Enemy,
        SubjectKind::Actor { .. } => ShadowCategory::Actor,
        SubjectKind::Event { .. } => ShadowCategory::Character,
    }
}

/// Everything resolution reads besides the subject itself.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub config: &'a GlobalShadowConfig,
    pub context: ShadowContext,
    /// Override parsed from the scene's (map's) own annotation.
    pub scene_override: &'a ShadowOverride,
}

impl<'a> ResolveContext<'a> {
    pub fn new(config: &'a GlobalShadowConfig, context: ShadowContext, scene_override: &'a ShadowOverride) -> Self {
        Self {
            config,
            context,
            scene_override,
        }
    }

    /// Category shape, superseded by the scene shape unless the category casts nothing.
    pub fn shape_for(&self, category: ShadowCategory) -> ShadowShape {
        let shape = self.config.shapes.get(category);
        match self.scene_override.shape {
            Some(scene_shape) if !shape.is_none() => scene_shape,
            _ => shape,
        }
    }

    /// Offset and scale defaults for a shape in this context.
    ///
    /// The scene override only replaces them when it names the same shape.
    pub fn defaults(&self, shape: ShadowShape) -> (Vec2, Vec2) {
        let base = self.config.context(self.context).for_shape(shape);
        let mut offset = Vec2::from(base.offset);
        let mut scale = Vec2::from(base.scale);

        let scene = self.scene_override;
        if scene.shape == Some(shape) {
            offset.x = scene.offset_x.unwrap_or(offset.x);
            offset.y = scene.offset_y.unwrap_or(offset.y);
            scale.x = scene.scale_x.unwrap_or(scale.x);
            scale.y = scene.scale_y.unwrap_or(scale.y);
        }
        (offset, scale)
    }

    /// Default rotation in degrees.
    pub fn angle(&self) -> f32 {
        self.scene_override
            .rotation
            .unwrap_or(self.config.context(self.context).angle)
    }

    /// Build a profile for `shape`, taking every field `ov` sets and
    /// defaults for the rest.
    pub fn build(&self, category: ShadowCategory, shape: ShadowShape, ov: &ShadowOverride) -> ShadowProfile {
        if shape.is_none() {
            return ShadowProfile::none(category);
        }

        let (offset, scale) = self.defaults(shape);
        let blur_radius = self.config.blur.for_shape(shape);
        ShadowProfile {
            category,
            shape,
            offset: Vec2::new(ov.offset_x.unwrap_or(offset.x), ov.offset_y.unwrap_or(offset.y)),
            scale: Vec2::new(ov.scale_x.unwrap_or(scale.x), ov.scale_y.unwrap_or(scale.y)),
            rotation: ov.rotation.unwrap_or_else(|| self.angle()),
            opacity_base: self.config.opacity,
            blur_radius,
            solid: blur_radius == 0.0,
        }
    }
}

/// Resolve a subject's profile from config, scene override and its annotations.
pub fn resolve(subject: &Subject, ctx: &ResolveContext) -> ShadowProfile {
    let category = classify(subject);

    let mut ov = subject.annotations.primary;
    if subject.kind.reads_alternate_notes() {
        ov.merge(&subject.annotations.alternate);
    }

    let shape = ov.shape.unwrap_or_else(|| ctx.shape_for(category));
    ctx.build(category, shape, &ov)
}

/// Force-apply a runtime override to an existing profile.
///
/// The shape is kept unless the override names one; every other field is
/// taken from the override or reset to the defaults of the resulting shape.
pub fn apply_runtime_override(profile: &mut ShadowProfile, ov: &ShadowOverride, ctx: &ResolveContext) {
    let shape = ov.shape.unwrap_or(profile.shape);
    *profile = ctx.build(profile.category, shape, ov);
}
