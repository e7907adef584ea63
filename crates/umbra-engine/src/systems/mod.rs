pub mod bitmap;
pub mod command;
pub mod geometry;
pub mod lifecycle;
pub mod resolver;
