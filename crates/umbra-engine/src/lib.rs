pub mod annotation;
pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use annotation::{parse, Annotations};
pub use api::error::ShadowError;
pub use api::types::{EventId, NodeId, ShadowContext, SubjectId};
pub use assets::config::GlobalShadowConfig;
pub use assets::layout::{measure_bitmap, SheetLayout};
pub use assets::registry::SheetRegistry;
pub use components::layer::RenderLayer;
pub use components::profile::{ShadowCategory, ShadowOverride, ShadowProfile, ShadowShape};
pub use components::subject::{Subject, SubjectKind, VehicleKind};
pub use components::transform::{BitmapSize, Facing, FrameRect, SubjectTransform};
pub use core::scene::ShadowScene;
pub use core::toggles::ShadowToggles;
pub use renderer::instance::{ShadowBuffer, ShadowInstance};
pub use renderer::traits::ShadowLayer;
pub use systems::bitmap::{build_bitmap, ShadowBitmap};
pub use systems::command::{ShadowCommand, TargetSelector};
pub use systems::geometry::{compute_transform, ShadowSprite};
pub use systems::lifecycle::{LifecycleState, ShadowSlot};
pub use systems::resolver::{apply_runtime_override, classify, resolve, ResolveContext};
