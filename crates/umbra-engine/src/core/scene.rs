use crate::annotation::{parse, Annotations};
use crate::api::types::{EventId, ShadowContext, SubjectId};
use crate::assets::config::GlobalShadowConfig;
use crate::assets::registry::SheetRegistry;
use crate::components::profile::{ShadowOverride, ShadowShape};
use crate::components::subject::{Subject, SubjectKind};
use crate::renderer::traits::ShadowLayer;
use crate::systems::command::{ShadowCommand, TargetSelector};
use crate::systems::lifecycle::{tick_subject, ShadowSlot, TickEnv};
use crate::systems::resolver::{apply_runtime_override, resolve, ResolveContext};
use super::toggles::ShadowToggles;

/// Shadow-casting subjects of one map or battle, stored in a flat Vec.
/// Sized for a map's worth of events, not thousands.
pub struct ShadowScene {
    subjects: Vec<Subject>,
    context: ShadowContext,
    scene_override: ShadowOverride,
    pub toggles: ShadowToggles,
    next_id: u32,
}

impl ShadowScene {
    pub fn new(context: ShadowContext) -> Self {
        Self {
            subjects: Vec::with_capacity(64),
            context,
            scene_override: ShadowOverride::default(),
            toggles: ShadowToggles::new(),
            next_id: 1,
        }
    }

    pub fn context(&self) -> ShadowContext {
        self.context
    }

    /// Read the scene-level override from the map's note. Only affects
    /// profiles resolved afterwards, so call it before the first tick.
    pub fn load_map_note(&mut self, note: &str) {
        self.scene_override = Annotations::from_note(note).primary;
    }

    pub fn scene_override(&self) -> &ShadowOverride {
        &self.scene_override
    }

    /// Allocate an id for a subject about to be spawned.
    pub fn next_id(&mut self) -> SubjectId {
        let id = SubjectId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn(&mut self, subject: Subject) -> SubjectId {
        let id = subject.id;
        self.next_id = self.next_id.max(id.0 + 1);
        self.subjects.push(subject);
        id
    }

    /// Remove a subject, detaching its shadow node first.
    pub fn despawn(&mut self, id: SubjectId, layer: &mut dyn ShadowLayer) -> Option<Subject> {
        let idx = self.subjects.iter().position(|s| s.id == id)?;
        let mut subject = self.subjects.swap_remove(idx);
        if let Some(slot) = subject.shadow.as_mut() {
            slot.detach(layer);
        }
        Some(subject)
    }

    pub fn get(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: SubjectId) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == id)
    }

    /// Find a map event by its host id.
    pub fn find_event(&self, event_id: EventId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.kind.event_id() == Some(event_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Subject> {
        self.subjects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Shape the subject casts, resolving without storing if needed.
    pub fn effective_shape(&self, subject: &Subject, config: &GlobalShadowConfig) -> ShadowShape {
        match &subject.shadow {
            Some(slot) => slot.profile.shape,
            None => resolve(subject, &self.resolve_context(config)).shape,
        }
    }

    /// Subjects a command target selects. Never yields duplicates.
    pub fn select_targets(
        &self,
        selector: &TargetSelector,
        invoker: Option<EventId>,
        config: &GlobalShadowConfig,
    ) -> Vec<SubjectId> {
        let events = self.subjects.iter().filter(|s| s.kind.event_id().is_some());
        match selector {
            TargetSelector::Player => self
                .subjects
                .iter()
                .filter(|s| s.kind == SubjectKind::Player)
                .map(|s| s.id)
                .collect(),
            TargetSelector::Invoker => match invoker {
                Some(event_id) => self.find_event(event_id).map(|s| s.id).into_iter().collect(),
                None => Vec::new(),
            },
            TargetSelector::Event(event_id) => self.find_event(*event_id).map(|s| s.id).into_iter().collect(),
            TargetSelector::All => events
                .filter(|s| !self.effective_shape(s, config).is_none())
                .map(|s| s.id)
                .collect(),
            TargetSelector::NameContains(token) => events
                .filter(|s| s.name.contains(token.as_str()))
                .map(|s| s.id)
                .collect(),
        }
    }

    /// Run a parsed command. Returns the number of subjects it changed.
    pub fn execute(&mut self, command: &ShadowCommand, invoker: Option<EventId>, config: &GlobalShadowConfig) -> usize {
        match command {
            ShadowCommand::Visible(v) => {
                self.toggles.set_visible(*v);
                0
            }
            ShadowCommand::MirrorX(v) => {
                self.toggles.set_mirror_x(*v);
                0
            }
            ShadowCommand::MirrorY(v) => {
                self.toggles.set_mirror_y(*v);
                0
            }
            ShadowCommand::Set { target, annotation } => {
                let ids = self.select_targets(target, invoker, config);
                let ov = parse(annotation);
                for &id in &ids {
                    self.set_profile(id, &ov, config);
                }
                ids.len()
            }
        }
    }

    fn set_profile(&mut self, id: SubjectId, ov: &ShadowOverride, config: &GlobalShadowConfig) {
        let ctx = ResolveContext::new(config, self.context, &self.scene_override);
        let Some(subject) = self.subjects.iter_mut().find(|s| s.id == id) else {
            return;
        };
        let slot = ensure_slot(subject, &ctx);
        apply_runtime_override(&mut slot.profile, ov, &ctx);
        if !slot.profile.shape.is_none() {
            slot.arise();
            return;
        }

        slot.clear();
        if subject.kind == SubjectKind::Player {
            for follower in self.subjects.iter_mut().filter(|s| matches!(s.kind, SubjectKind::Follower { .. })) {
                if let Some(slot) = follower.shadow.as_mut() {
                    slot.clear();
                }
            }
        }
    }

    /// Advance every subject one frame.
    pub fn tick(&mut self, sheets: &SheetRegistry, layer: &mut dyn ShadowLayer, config: &GlobalShadowConfig) {
        let ctx = ResolveContext::new(config, self.context, &self.scene_override);
        let env = TickEnv { sheets, toggles: &self.toggles, config };
        for subject in self.subjects.iter_mut() {
            ensure_slot(subject, &ctx);
            tick_subject(subject, &env, layer);
        }
    }

    /// Detach every shadow node before the host tears its scene down.
    ///
    /// Toggles reset. In battle, battler profiles are dropped with the
    /// battle; everything else is re-created on the next tick.
    pub fn teardown(&mut self, layer: &mut dyn ShadowLayer) {
        let battle = self.context == ShadowContext::Battle;
        for subject in self.subjects.iter_mut() {
            if let Some(slot) = subject.shadow.as_mut() {
                slot.detach(layer);
            }
            if battle && subject.kind.is_battler() {
                subject.shadow = None;
            }
        }
        self.toggles.reset();
        log::debug!("shadow scene torn down ({} subjects)", self.subjects.len());
    }

    /// Whether the host's own built-in shadow should stay visible for this
    /// subject. Hidden while a shadow of any shape replaces it.
    pub fn host_shadow_visible(&self, id: SubjectId) -> bool {
        self.get(id)
            .and_then(|s| s.shadow.as_ref())
            .map_or(true, |slot| slot.profile.shape.is_none())
    }

    fn resolve_context<'a>(&'a self, config: &'a GlobalShadowConfig) -> ResolveContext<'a> {
        ResolveContext::new(config, self.context, &self.scene_override)
    }
}

/// Resolve a subject's profile on first need.
fn ensure_slot<'s>(subject: &'s mut Subject, ctx: &ResolveContext) -> &'s mut ShadowSlot {
    let slot = match subject.shadow.take() {
        Some(slot) => slot,
        None => {
            let profile = resolve(subject, ctx);
            log::trace!("shadow {:?}: resolved {:?}", subject.id, profile.shape);
            ShadowSlot::new(profile)
        }
    };
    subject.shadow.insert(slot)
}

impl Default for ShadowScene {
    fn default() -> Self {
        Self::new(ShadowContext::Map)
    }
}
