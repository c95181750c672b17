use wasm_bindgen::prelude::*;

/// Timings and counters of the most recent frame. Stage timings accumulate
/// over every fixed tick the frame ran.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) frame_ms: f64,
    pub(super) physics_ms: f64,
    pub(super) drag_ms: f64,
    pub(super) stabilizer_ms: f64,
    pub(super) curve_ms: f64,
    pub(super) mesh_ms: f64,
    pub(super) ticks: u32,
    pub(super) vertices: u32,
    pub(super) indices: u32,
    pub(super) geometry_generation: u32,
    pub(super) geometry_released: u32,
    pub(super) sleeping_bodies: u32,
    pub(super) kinematic_bodies: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn frame_ms(&self) -> f64 { self.frame_ms }
    #[wasm_bindgen(getter)]
    pub fn physics_ms(&self) -> f64 { self.physics_ms }
    #[wasm_bindgen(getter)]
    pub fn drag_ms(&self) -> f64 { self.drag_ms }
    #[wasm_bindgen(getter)]
    pub fn stabilizer_ms(&self) -> f64 { self.stabilizer_ms }
    #[wasm_bindgen(getter)]
    pub fn curve_ms(&self) -> f64 { self.curve_ms }
    #[wasm_bindgen(getter)]
    pub fn mesh_ms(&self) -> f64 { self.mesh_ms }
    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> u32 { self.ticks }
    #[wasm_bindgen(getter)]
    pub fn vertices(&self) -> u32 { self.vertices }
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> u32 { self.indices }
    #[wasm_bindgen(getter)]
    pub fn geometry_generation(&self) -> u32 { self.geometry_generation }
    #[wasm_bindgen(getter)]
    pub fn geometry_released(&self) -> u32 { self.geometry_released }
    #[wasm_bindgen(getter)]
    pub fn sleeping_bodies(&self) -> u32 { self.sleeping_bodies }
    #[wasm_bindgen(getter)]
    pub fn kinematic_bodies(&self) -> u32 { self.kinematic_bodies }
}
