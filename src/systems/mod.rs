//! Pipeline stages, in tick order after the physics step:
//! drag -> stabilizer -> curve -> ribbon.

pub mod background;
pub mod curve;
pub mod drag;
pub mod physics;
pub mod ribbon;
pub mod spline;
pub mod stabilizer;
