use glam::{Vec2, Vec3};
use wasm_bindgen::prelude::*;

use crate::drag::CursorHint;

use super::perf_stats::PerfStats;
use super::BadgeCore;

/// Where the live ribbon buffers sit in wasm memory. Lengths are in elements
/// (f32 for positions/normals/uvs, u32 for indices).
#[wasm_bindgen]
pub struct RibbonLayout {
    positions_ptr: u32,
    positions_len: u32,
    normals_ptr: u32,
    normals_len: u32,
    uvs_ptr: u32,
    uvs_len: u32,
    indices_ptr: u32,
    indices_len: u32,
    generation: u32,
}

#[wasm_bindgen]
impl RibbonLayout {
    #[wasm_bindgen(getter)]
    pub fn positions_ptr(&self) -> u32 { self.positions_ptr }
    #[wasm_bindgen(getter)]
    pub fn positions_len(&self) -> u32 { self.positions_len }

    #[wasm_bindgen(getter)]
    pub fn normals_ptr(&self) -> u32 { self.normals_ptr }
    #[wasm_bindgen(getter)]
    pub fn normals_len(&self) -> u32 { self.normals_len }

    #[wasm_bindgen(getter)]
    pub fn uvs_ptr(&self) -> u32 { self.uvs_ptr }
    #[wasm_bindgen(getter)]
    pub fn uvs_len(&self) -> u32 { self.uvs_len }

    #[wasm_bindgen(getter)]
    pub fn indices_ptr(&self) -> u32 { self.indices_ptr }
    #[wasm_bindgen(getter)]
    pub fn indices_len(&self) -> u32 { self.indices_len }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u32 { self.generation }
}

#[wasm_bindgen]
pub struct Badge {
    core: BadgeCore,
}

#[wasm_bindgen]
impl Badge {
    /// Badge with default tuning
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { core: BadgeCore::new() }
    }

    /// Badge from a camelCase config object serialized as JSON
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: String) -> Result<Badge, JsValue> {
        let core = BadgeCore::from_config_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { core })
    }

    pub fn set_config(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .set_config_json(&json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn get_config(&self) -> String {
        self.core.config_json()
    }

    #[wasm_bindgen(getter)]
    pub fn debug(&self) -> bool { self.core.config().debug }

    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> u64 { self.core.ticks() }

    #[wasm_bindgen(getter)]
    pub fn interpolation_alpha(&self) -> f32 { self.core.interpolation_alpha() }

    #[wasm_bindgen(getter)]
    pub fn geometry_generation(&self) -> u64 { self.core.geometry_generation() }

    /// Canvas size in CSS pixels
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.core.set_viewport(width, height);
    }

    pub fn set_camera(&mut self, x: f32, y: f32, z: f32, fov_y_degrees: f32) {
        self.core.set_camera(Vec3::new(x, y, z), fov_y_degrees);
    }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last frame perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === POINTER API (NDC, -1..1) ===

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.core.pointer_move(Vec2::new(x, y));
    }

    /// Returns true when the card was grabbed
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.core.pointer_down(Vec2::new(x, y))
    }

    pub fn pointer_up(&mut self) {
        self.core.pointer_up();
    }

    pub fn pointer_cancel(&mut self) {
        self.core.pointer_cancel();
    }

    pub fn cursor_hint(&self) -> CursorHint {
        self.core.cursor_hint()
    }

    /// CSS cursor for the canvas
    pub fn cursor_css(&self) -> String {
        self.core.cursor_hint().as_css().to_string()
    }

    // === STEPPING ===

    /// Advance by the frame delta in seconds; returns the fixed ticks run
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.core.frame(dt)
    }

    pub fn tick(&mut self) {
        self.core.tick();
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }

    // === RENDER EXTRACTION ===

    pub fn ribbon_layout(&self) -> RibbonLayout {
        let data = self.core.ribbon_layout_data();
        RibbonLayout {
            positions_ptr: data.positions_ptr as u32,
            positions_len: data.positions_len as u32,
            normals_ptr: data.normals_ptr as u32,
            normals_len: data.normals_len as u32,
            uvs_ptr: data.uvs_ptr as u32,
            uvs_len: data.uvs_len as u32,
            indices_ptr: data.indices_ptr as u32,
            indices_len: data.indices_len as u32,
            generation: data.generation as u32,
        }
    }

    /// Column-major card model matrix (16 floats)
    pub fn card_matrix(&self) -> Vec<f32> {
        self.core.card_matrix().to_vec()
    }

    pub fn group_matrix(&self) -> Vec<f32> {
        self.core.group_matrix().to_vec()
    }

    /// xyz per chain body, group space
    pub fn debug_nodes(&self) -> Vec<f32> {
        self.core.debug_nodes().to_vec()
    }

    pub fn material_json(&self) -> String {
        self.core.material().to_json()
    }

    pub fn glitter_uniforms_json(&self) -> String {
        self.core.background().uniforms_json()
    }

    pub fn glitter_visible(&self) -> bool {
        self.core.background().is_visible()
    }

    /// RGBA8 noise texture, `noise_texture_size()` squared
    pub fn noise_ptr(&self) -> *const u8 {
        self.core.noise_ptr()
    }

    pub fn noise_len(&self) -> usize {
        self.core.noise_len()
    }
}

impl Default for Badge {
    fn default() -> Self {
        Self::new()
    }
}
