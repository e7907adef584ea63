pub mod layer;
pub mod profile;
pub mod subject;
pub mod transform;
