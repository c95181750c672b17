//! Lanyard Engine - ribbon physics and geometry for the interactive badge, in WASM
//!
//! The JS side owns the renderer and the scene graph. Every frame it calls
//! `Badge::frame(dt)` and re-uploads the ribbon buffers when the geometry
//! generation changes.
//!
//! Architecture:
//! - core/        - math helpers, logging, rng
//! - domain/      - config, chain, camera, material
//! - systems/     - physics stand-in, drag, stabilizer, curve, ribbon, background
//! - simulation/  - per-tick orchestration and the WASM facade
//! - api/         - public API

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod api;

// Compatibility re-exports (short paths for the pipeline stages)
pub use domain::config;
pub use domain::chain;
pub use systems::physics;
pub use systems::drag;
pub use systems::stabilizer;
pub use systems::curve;
pub use systems::ribbon;
pub use systems::background;

use wasm_bindgen::prelude::*;

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::init_logger(log::LevelFilter::Info);
    log::info!("Lanyard engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Raise or lower console verbosity (0 = off .. 5 = trace)
#[wasm_bindgen]
pub fn set_log_level(level: u8) {
    crate::core::logging::set_level(level);
}

// Re-export main types
pub use api::wasm::Badge;
pub use simulation::BadgeCore;
pub use systems::drag::CursorHint;

// Export pipeline constants for JS
#[wasm_bindgen]
pub fn ribbon_segments() -> u32 { systems::ribbon::SEGMENTS as u32 }
#[wasm_bindgen]
pub fn curve_samples() -> u32 { systems::curve::CURVE_SAMPLES as u32 }
#[wasm_bindgen]
pub fn noise_texture_size() -> u32 { systems::background::NOISE_TEXTURE_SIZE as u32 }
