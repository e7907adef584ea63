use serde::{Deserialize, Serialize};

/// Unique identifier for a shadow-casting subject in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectId(pub u32);

/// Identifier of a map event, as assigned by the host's map data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u32);

/// Handle to a shadow node attached to the host's scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Which kind of scene the shadows live in.
/// Map and battle scenes carry separate default offsets, sizes and angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowContext {
    #[default]
    Map,
    Battle,
}
