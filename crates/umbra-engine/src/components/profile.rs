//! Shadow profile: the resolved shadow configuration a subject carries.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shape of a shadow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowShape {
    /// Blackened copy of the subject's current sprite frame.
    #[default]
    #[serde(alias = "real")]
    Silhouette,
    /// Gradient-filled oval.
    #[serde(alias = "circle")]
    Ellipse,
    /// No shadow at all.
    None,
}

impl ShadowShape {
    /// Parse the annotation spelling (`real`, `circle`, `none`).
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "real" => Some(Self::Silhouette),
            "circle" => Some(Self::Ellipse),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

/// Category a subject falls into for picking its default shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowCategory {
    /// Party leader or a follower.
    Player,
    /// Any other map character.
    Character,
    /// Map character whose image is marked as an object (`!` prefix).
    Object,
    /// Map event drawn from the tileset.
    Tile,
    Vehicle,
    Actor,
    Enemy,
}

/// Sparse set of shadow fields to override.
///
/// `None` means "inherit"; the textual annotation language maps blank and
/// zero values to `None` as well.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShadowOverride {
    pub shape: Option<ShadowShape>,
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
    pub scale_x: Option<f32>,
    pub scale_y: Option<f32>,
    /// Rotation in degrees.
    pub rotation: Option<f32>,
}

impl ShadowOverride {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layer `other` on top of `self`: every field `other` sets wins.
    pub fn merge(&mut self, other: &ShadowOverride) {
        self.shape = other.shape.or(self.shape);
        self.offset_x = other.offset_x.or(self.offset_x);
        self.offset_y = other.offset_y.or(self.offset_y);
        self.scale_x = other.scale_x.or(self.scale_x);
        self.scale_y = other.scale_y.or(self.scale_y);
        self.rotation = other.rotation.or(self.rotation);
    }
}

/// Resolved shadow configuration for one subject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowProfile {
    pub category: ShadowCategory,
    pub shape: ShadowShape,
    /// Offset as a fraction of the subject's bitmap width/height.
    pub offset: Vec2,
    /// Scale as a fraction of the subject's size.
    pub scale: Vec2,
    /// Extra rotation in degrees, added to the subject's own rotation.
    pub rotation: f32,
    /// Opacity ceiling (0-255).
    pub opacity_base: u8,
    /// Blur radius in pixels (0 = crisp edges).
    pub blur_radius: f32,
    /// Derived: the shape is drawn without blur.
    pub solid: bool,
}

impl ShadowProfile {
    /// A profile that casts nothing.
    pub fn none(category: ShadowCategory) -> Self {
        Self {
            category,
            shape: ShadowShape::None,
            offset: Vec2::ZERO,
            scale: Vec2::ZERO,
            rotation: 0.0,
            opacity_base: 0,
            blur_radius: 0.0,
            solid: false,
        }
    }

    pub fn casts_shadow(&self) -> bool {
        !self.shape.is_none()
    }
}
