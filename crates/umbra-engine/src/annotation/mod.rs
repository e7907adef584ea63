//! Shadow annotations carried in entity / map notes.

pub mod meta;
pub mod parser;

pub use parser::parse;

use crate::components::profile::ShadowOverride;

/// Note tag holding the primary shadow parameters.
pub const PRIMARY_TAG: &str = "shadow";
/// Note tag for the alternate graphic state (map walking sprite of a party member).
pub const ALTERNATE_TAG: &str = "shadowAlt";

/// Parsed shadow overrides from both annotation channels of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Annotations {
    pub primary: ShadowOverride,
    pub alternate: ShadowOverride,
}

impl Annotations {
    /// Extract and parse both channels from free-text note content.
    pub fn from_note(note: &str) -> Self {
        Self {
            primary: meta::tag_value(note, PRIMARY_TAG).map(parse).unwrap_or_default(),
            alternate: meta::tag_value(note, ALTERNATE_TAG).map(parse).unwrap_or_default(),
        }
    }

    /// Build from already-extracted parameter strings.
    pub fn from_params(primary: Option<&str>, alternate: Option<&str>) -> Self {
        Self {
            primary: primary.map(parse).unwrap_or_default(),
            alternate: alternate.map(parse).unwrap_or_default(),
        }
    }
}
