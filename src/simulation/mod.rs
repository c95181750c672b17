//! Badge - the lanyard scene and its per-tick pipeline
//!
//! `BadgeCore` owns the physics world, the chain and every pipeline stage.
//! It only orchestrates: the work is done in systems/ (drag, stabilizer,
//! curve, ribbon) and the WASM surface is in facade.rs.
//!
//! Coordinates: physics runs in the badge group's local frame. The group is
//! rotated by `config.rotation`; pointer rays are brought into group space
//! before they reach the drag controller.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::chain::{Chain, LanyardLayout};
use crate::config::{BadgeConfig, ConfigError};
use crate::curve::CurveSampler;
use crate::domain::camera::Camera;
use crate::domain::material::BandMaterial;
use crate::drag::{CursorHint, DragController, DragState};
use crate::physics::LanyardWorld;
use crate::ribbon::{GeometrySlot, RibbonMesh, RibbonMeshBuilder, RibbonParams};
use crate::stabilizer::{Orientation, OrientationStabilizer};
use crate::background::GlitterBackground;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/clock.rs"]
mod clock;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use clock::FixedClock;
pub use facade::{Badge, RibbonLayout};
pub use init::spawn_lanyard;
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// Physics tick length, seconds.
pub const FIXED_DT: f32 = 1.0 / 60.0;
/// Most ticks a single frame may run before dropping time.
pub const MAX_TICKS_PER_FRAME: u32 = 5;
/// Seed of the background noise texture.
const NOISE_SEED: u32 = 0x5EED_1A7D;

pub(crate) struct RibbonLayoutData {
    pub(crate) positions_ptr: *const f32,
    pub(crate) positions_len: usize,
    pub(crate) normals_ptr: *const f32,
    pub(crate) normals_len: usize,
    pub(crate) uvs_ptr: *const f32,
    pub(crate) uvs_len: usize,
    pub(crate) indices_ptr: *const u32,
    pub(crate) indices_len: usize,
    pub(crate) generation: u64,
}

/// The lanyard scene
pub struct BadgeCore {
    config: BadgeConfig,
    layout: LanyardLayout,
    world: LanyardWorld,
    chain: Chain,

    camera: Camera,
    viewport: Vec2,
    pointer_ndc: Vec2,

    drag: DragController,
    stabilizer: OrientationStabilizer,
    orientation: Option<Orientation>,
    curve: CurveSampler,
    builder: RibbonMeshBuilder,
    ribbon_params: RibbonParams,
    geometry: GeometrySlot,
    material: BandMaterial,
    background: GlitterBackground,

    clock: FixedClock,
    elapsed: f32,
    ticks: u64,

    // Render scratch, refreshed once per frame
    card_matrix: [f32; 16],
    debug_nodes: Vec<f32>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl BadgeCore {
    /// Scene with default tuning.
    pub fn new() -> Self {
        init::create_badge_core(BadgeConfig::default())
    }

    pub fn with_config(config: BadgeConfig) -> Self {
        init::create_badge_core(config.clamped())
    }

    pub fn from_config_json(json: &str) -> Result<Self, ConfigError> {
        Ok(init::create_badge_core(BadgeConfig::from_json(json)?))
    }

    /// Respawn the lanyard at its initial layout, keeping the config.
    pub fn reset(&mut self) {
        init::reset(self);
    }

    // === CONFIG ===

    pub fn config(&self) -> &BadgeConfig {
        &self.config
    }

    pub fn config_json(&self) -> String {
        self.config.to_json()
    }

    pub fn set_config(&mut self, config: BadgeConfig) {
        settings::apply_config(self, config.clamped());
    }

    pub fn set_config_json(&mut self, json: &str) -> Result<(), ConfigError> {
        let config = BadgeConfig::from_json(json)?;
        settings::apply_config(self, config);
        Ok(())
    }

    pub fn material(&self) -> &BandMaterial {
        &self.material
    }

    /// Rotation of the badge group.
    pub fn group_rotation(&self) -> Quat {
        self.config.rotation.euler()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        settings::set_viewport(self, width, height);
    }

    pub fn set_camera(&mut self, position: Vec3, fov_y_degrees: f32) {
        settings::set_camera(self, position, fov_y_degrees);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Enable or disable per-frame perf metrics
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last frame's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === POINTER ===

    pub fn pointer_move(&mut self, ndc: Vec2) {
        commands::pointer_move(self, ndc);
    }

    /// Returns true when the pointer grabbed the card.
    pub fn pointer_down(&mut self, ndc: Vec2) -> bool {
        commands::pointer_down(self, ndc)
    }

    pub fn pointer_up(&mut self) {
        commands::pointer_up(self);
    }

    pub fn pointer_cancel(&mut self) {
        commands::pointer_cancel(self);
    }

    pub fn cursor_hint(&self) -> CursorHint {
        self.drag.cursor_hint()
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    // === STEPPING ===

    /// Advance by a frame delta: runs whole fixed ticks, then refreshes the
    /// render snapshot. Returns the number of ticks run.
    pub fn frame(&mut self, dt: f32) -> u32 {
        step::frame(self, dt)
    }

    /// One fixed tick: physics, then drag, stabilizer, curve and mesh.
    pub fn tick(&mut self) {
        step::tick(self);
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn interpolation_alpha(&self) -> f32 {
        self.clock.alpha()
    }

    // === STATE ===

    pub fn world(&self) -> &LanyardWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut LanyardWorld {
        &mut self.world
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn orientation(&self) -> Option<&Orientation> {
        self.orientation.as_ref()
    }

    pub fn control_points(&self) -> &[Vec3] {
        self.curve.control_points()
    }

    pub fn curve_samples(&self) -> &[Vec3] {
        self.curve.samples()
    }

    pub fn ribbon(&self) -> Option<&RibbonMesh> {
        self.geometry.current()
    }

    pub fn geometry_generation(&self) -> u64 {
        self.geometry.generation()
    }

    pub fn geometry_released(&self) -> u64 {
        self.geometry.released()
    }

    pub fn background(&self) -> &GlitterBackground {
        &self.background
    }

    // === RENDER EXTRACTION ===

    /// Column-major model matrix of the card, interpolated, in world space.
    pub fn card_matrix(&self) -> &[f32; 16] {
        &self.card_matrix
    }

    pub fn group_matrix(&self) -> [f32; 16] {
        Mat4::from_quat(self.group_rotation()).to_cols_array()
    }

    /// Flat xyz of every chain body, interpolated, group space.
    pub fn debug_nodes(&self) -> &[f32] {
        &self.debug_nodes
    }

    pub fn noise_ptr(&self) -> *const u8 {
        self.background.noise().as_ptr()
    }

    pub fn noise_len(&self) -> usize {
        self.background.noise().len()
    }

    pub(crate) fn ribbon_layout_data(&self) -> RibbonLayoutData {
        render_extract::ribbon_layout_data(self)
    }
}

impl Default for BadgeCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
