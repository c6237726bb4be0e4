pub mod render;
pub mod targets;
