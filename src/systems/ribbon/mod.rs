//! Ribbon mesh synthesis.
//!
//! A flat band with thickness swept along the sampled curve. All frames share
//! one reference up taken from the card, so the band cannot flip the way a
//! Frenet frame does at inflection points.

mod frames;
mod mesh;
mod slot;

pub use frames::{frame_at, Frame};
pub use mesh::{RibbonMesh, RibbonMeshBuilder, RibbonParams, MIN_THICKNESS};
pub use slot::GeometrySlot;

/// Segments along the band; vertices come in rings of four per step.
pub const SEGMENTS: usize = 52;
pub const VERTICES_PER_STEP: usize = 4;
/// 8 triangles per segment: front, back, top edge, bottom edge.
pub const INDICES_PER_SEGMENT: usize = 24;
