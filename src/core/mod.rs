//! Core helpers shared by every stage: math, logging, rng.

pub mod logging;
pub mod math;
pub mod random;
