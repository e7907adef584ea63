use glam::Vec2;
use crate::annotation::Annotations;
use crate::api::types::{EventId, SubjectId};
use crate::components::transform::{FrameRect, SubjectTransform};
use crate::systems::lifecycle::ShadowSlot;

/// Vehicle type, for hosts that distinguish them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    Boat,
    Ship,
    Airship,
}

/// What a subject is. Drives category classification and which
/// annotation channels are consulted.
#[derive(Debug, Clone, PartialEq)]
pub enum SubjectKind {
    /// The party leader walking the map.
    Player,
    /// A party member trailing the leader (1-based member index).
    Follower { member_index: usize },
    /// A map event.
    Event {
        event_id: EventId,
        /// Drawn from a tileset tile rather than a character sheet.
        tile: bool,
    },
    Vehicle(VehicleKind),
    /// Party member in battle.
    Actor { actor_id: u32 },
    /// Troop member in battle.
    Enemy { enemy_id: u32, index: usize },
}

impl SubjectKind {
    pub fn event_id(&self) -> Option<EventId> {
        match self {
            Self::Event { event_id, .. } => Some(*event_id),
            _ => None,
        }
    }

    pub fn is_battler(&self) -> bool {
        matches!(self, Self::Actor { .. } | Self::Enemy { .. })
    }

    /// Whether the alternate annotation channel applies (party members and battlers).
    pub fn reads_alternate_notes(&self) -> bool {
        matches!(
            self,
            Self::Player | Self::Follower { .. } | Self::Actor { .. } | Self::Enemy { .. }
        )
    }
}

/// A shadow-casting game entity.
///
/// Fat struct in the spirit of the engine's entities: the host writes the
/// transform snapshot each frame, the engine owns the shadow slot.
#[derive(Debug, Clone)]
pub struct Subject {
    pub id: SubjectId,
    pub kind: SubjectKind,
    /// Display name, used by name-based command targeting.
    pub name: String,
    /// Name of the sheet the subject is drawn from.
    pub image_name: String,
    pub annotations: Annotations,
    pub transform: SubjectTransform,
    /// Shadow state (created lazily on first tick).
    pub shadow: Option<ShadowSlot>,
}

impl Subject {
    pub fn new(id: SubjectId, kind: SubjectKind) -> Self {
        Self {
            id,
            kind,
            name: String::new(),
            image_name: String::new(),
            annotations: Annotations::default(),
            transform: SubjectTransform::default(),
            shadow: None,
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_image(mut self, image_name: impl Into<String>) -> Self {
        self.image_name = image_name.into();
        self
    }

    /// Attach note text; `<shadow:...>` and `<shadowAlt:...>` tags are extracted.
    pub fn with_note(mut self, note: &str) -> Self {
        self.annotations = Annotations::from_note(note);
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.transform.screen_pos = pos;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_frame(mut self, frame: FrameRect) -> Self {
        self.transform.frame = frame;
        self
    }

    /// Whether a shadow node is currently attached for this subject.
    pub fn has_shadow_node(&self) -> bool {
        self.shadow.as_ref().is_some_and(|slot| slot.node().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::profile::ShadowShape;

    #[test]
    fn builder_sets_fields() {
        let subject = Subject::new(SubjectId(3), SubjectKind::Event { event_id: EventId(7), tile: false })
            .with_name("Guard")
            .with_image("People1")
            .with_pos(Vec2::new(10.0, 20.0))
            .with_note("Stands by the gate <shadow:circle>");

        assert_eq!(subject.kind.event_id(), Some(EventId(7)));
        assert_eq!(subject.name, "Guard");
        assert_eq!(subject.transform.screen_pos, Vec2::new(10.0, 20.0));
        assert_eq!(subject.annotations.primary.shape, Some(ShadowShape::Ellipse));
        assert!(subject.shadow.is_none());
        assert!(!subject.has_shadow_node());
    }

    #[test]
    fn alternate_notes_only_for_party_and_battlers() {
        assert!(SubjectKind::Player.reads_alternate_notes());
        assert!(SubjectKind::Follower { member_index: 1 }.reads_alternate_notes());
        assert!(SubjectKind::Actor { actor_id: 1 }.reads_alternate_notes());
        assert!(SubjectKind::Enemy { enemy_id: 4, index: 0 }.reads_alternate_notes());
        assert!(!SubjectKind::Vehicle(VehicleKind::Ship).reads_alternate_notes());
        assert!(!SubjectKind::Event { event_id: EventId(1), tile: false }.reads_alternate_notes());
    }
}
