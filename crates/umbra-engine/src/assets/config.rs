use serde::{Deserialize, Serialize};
use crate::api::error::ShadowError;
use crate::api::types::ShadowContext;
use crate::components::profile::{ShadowCategory, ShadowShape};

/// Offset and size defaults for one shape in one context.
/// Values are fractions of the subject's bitmap size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeDefaults {
    pub offset: [f32; 2],
    pub scale: [f32; 2],
}

/// Defaults for one context (map or battle).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextDefaults {
    pub silhouette: ShapeDefaults,
    pub ellipse: ShapeDefaults,
    /// Rotation in degrees applied to every shadow in this context.
    pub angle: f32,
}

impl ContextDefaults {
    /// Defaults for a shape. `None` shares the silhouette slot; it is never drawn.
    pub fn for_shape(&self, shape: ShadowShape) -> ShapeDefaults {
        match shape {
            ShadowShape::Ellipse => self.ellipse,
            ShadowShape::Silhouette | ShadowShape::None => self.silhouette,
        }
    }
}

impl Default for ContextDefaults {
    fn default() -> Self {
        Self {
            silhouette: ShapeDefaults {
                offset: [0.20, -0.25],
                scale: [1.10, 0.50],
            },
            ellipse: ShapeDefaults {
                offset: [0.0, 0.0],
                scale: [0.85, 0.30],
            },
            angle: 0.0,
        }
    }
}

/// Default shape per subject category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryShapes {
    pub player: ShadowShape,
    pub character: ShadowShape,
    pub object: ShadowShape,
    pub tile: ShadowShape,
    pub vehicle: ShadowShape,
    pub actor: ShadowShape,
    pub enemy: ShadowShape,
}

impl CategoryShapes {
    pub fn get(&self, category: ShadowCategory) -> ShadowShape {
        match category {
            ShadowCategory::Player => self.player,
            ShadowCategory::Character => self.character,
            ShadowCategory::Object => self.object,
            ShadowCategory::Tile => self.tile,
            ShadowCategory::Vehicle => self.vehicle,
            ShadowCategory::Actor => self.actor,
            ShadowCategory::Enemy => self.enemy,
        }
    }
}

impl Default for CategoryShapes {
    fn default() -> Self {
        Self {
            player: ShadowShape::Silhouette,
            character: ShadowShape::Silhouette,
            object: ShadowShape::Silhouette,
            tile: ShadowShape::None,
            vehicle: ShadowShape::Silhouette,
            actor: ShadowShape::Silhouette,
            enemy: ShadowShape::Silhouette,
        }
    }
}

/// Blur radius per drawn shape, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurRadii {
    pub silhouette: f32,
    pub ellipse: f32,
}

impl BlurRadii {
    pub fn for_shape(&self, shape: ShadowShape) -> f32 {
        match shape {
            ShadowShape::Silhouette => self.silhouette,
            ShadowShape::Ellipse => self.ellipse,
            ShadowShape::None => 0.0,
        }
    }
}

impl Default for BlurRadii {
    fn default() -> Self {
        Self {
            silhouette: 0.0,
            ellipse: 15.0,
        }
    }
}

/// Hide a battler's shadow once it is defeated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeathFlags {
    pub actor: bool,
    pub enemy: bool,
}

/// Process-wide shadow configuration, loaded once from JSON.
///
/// Every field has a default, so a partial (or empty) document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalShadowConfig {
    pub shapes: CategoryShapes,
    pub map: ContextDefaults,
    pub battle: ContextDefaults,
    /// Opacity ceiling of every shadow (0-255).
    pub opacity: u8,
    pub blur: BlurRadii,
    /// Jump height (in tiles) at which the shadow would shrink to nothing.
    pub jump_shrink_divisor: f32,
    /// Floor applied to the jump shrink factor.
    pub min_jump_scale: f32,
    /// Tile size in pixels, for converting jump heights to tiles.
    pub tile_size: [f32; 2],
    /// Mirror the shadow offset when the subject faces right or up.
    pub mirror_by_facing: bool,
    pub hide_on_death: DeathFlags,
}

impl Default for GlobalShadowConfig {
    fn default() -> Self {
        Self {
            shapes: CategoryShapes::default(),
            map: ContextDefaults::default(),
            battle: ContextDefaults::default(),
            opacity: 128,
            blur: BlurRadii::default(),
            jump_shrink_divisor: 10.0,
            min_jump_scale: 0.05,
            tile_size: [48.0, 48.0],
            mirror_by_facing: false,
            hide_on_death: DeathFlags::default(),
        }
    }
}

impl GlobalShadowConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ShadowError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn context(&self, context: ShadowContext) -> &ContextDefaults {
        match context {
            ShadowContext::Map => &self.map,
            ShadowContext::Battle => &self.battle,
        }
    }

    pub fn hides_on_death(&self, category: ShadowCategory) -> bool {
        match category {
            ShadowCategory::Actor => self.hide_on_death.actor,
            ShadowCategory::Enemy => self.hide_on_death.enemy,
            _ => false,
        }
    }
}
