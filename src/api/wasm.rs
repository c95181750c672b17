//! JS-facing surface.

pub use crate::simulation::{Badge, PerfStats, RibbonLayout};
pub use crate::systems::drag::CursorHint;
