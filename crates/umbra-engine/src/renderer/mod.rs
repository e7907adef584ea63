pub mod instance;
pub mod traits;

pub use instance::{ShadowBuffer, ShadowInstance};
pub use traits::ShadowLayer;
