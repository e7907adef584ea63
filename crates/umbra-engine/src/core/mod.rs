pub mod scene;
pub mod toggles;
