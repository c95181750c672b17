pub mod camera;
pub mod chain;
pub mod config;
pub mod material;
