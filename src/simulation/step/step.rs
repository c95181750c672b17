use crate::physics::{BodyMode, PhysicsWorld, RigidBodyApi};
use crate::stabilizer::OrientationStabilizer;

use super::{render_extract, BadgeCore, PerfTimer, FIXED_DT};

#[inline]
fn lap(timer: &mut Option<PerfTimer>) -> f64 {
    timer.as_mut().map_or(0.0, PerfTimer::lap_ms)
}

pub(super) fn frame(core: &mut BadgeCore, dt: f32) -> u32 {
    let perf_on = core.perf_enabled;
    if perf_on {
        core.perf_stats.reset();
    }
    let frame_start = if perf_on { Some(PerfTimer::start()) } else { None };

    let ticks = core.clock.advance(dt);
    for _ in 0..ticks {
        tick(core);
    }

    if dt.is_finite() && dt > 0.0 {
        core.elapsed += dt;
    }
    core.background.update(
        core.elapsed,
        core.viewport.x,
        core.viewport.y,
        core.pointer_ndc.to_array(),
    );
    render_extract::refresh(core);

    if let Some(start) = frame_start {
        snapshot_counters(core, ticks);
        core.perf_stats.frame_ms = start.elapsed_ms();
    }
    ticks
}

/// One fixed tick. Kinematic targets set here are consumed by the next
/// physics step.
pub(super) fn tick(core: &mut BadgeCore) {
    let mut timer = if core.perf_enabled { Some(PerfTimer::start()) } else { None };

    // === PHYSICS ===
    core.world.step(FIXED_DT);
    core.perf_stats.physics_ms += lap(&mut timer);

    // === DRAG ===
    core.drag.apply(&mut core.world, &core.chain);
    core.perf_stats.drag_ms += lap(&mut timer);

    // === STABILIZER ===
    let offset = core.config.ribbon_rotation_offset;
    core.orientation = if core.config.stabilize {
        core.stabilizer.update(&mut core.world, &mut core.chain, &offset)
    } else {
        OrientationStabilizer::smooth_free_joints(&core.world, &mut core.chain);
        OrientationStabilizer::observe(&core.world, &core.chain, &offset)
    };
    core.perf_stats.stabilizer_ms += lap(&mut timer);

    // === CURVE + MESH ===
    rebuild_ribbon(core, &mut timer);

    core.ticks += 1;
}

/// Build geometry from the current pose without driving any body.
pub(super) fn refresh_geometry(core: &mut BadgeCore) {
    core.orientation =
        OrientationStabilizer::observe(&core.world, &core.chain, &core.config.ribbon_rotation_offset);
    rebuild_ribbon(core, &mut None);
}

fn rebuild_ribbon(core: &mut BadgeCore, timer: &mut Option<PerfTimer>) {
    let Some(orientation) = core.orientation else {
        return;
    };
    if !core.curve.update(&core.world, &core.chain, orientation.ribbon_direction) {
        return;
    }
    core.perf_stats.curve_ms += lap(timer);

    let mesh = core
        .builder
        .build(core.curve.samples(), orientation.reference_up, &core.ribbon_params);
    if mesh.is_finite() {
        core.geometry.replace(mesh);
    } else {
        log::warn!("skipping non-finite ribbon mesh at tick {}", core.ticks);
    }
    core.perf_stats.mesh_ms += lap(timer);
}

fn snapshot_counters(core: &mut BadgeCore, ticks: u32) {
    let stats = &mut core.perf_stats;
    stats.ticks = ticks;
    if let Some(mesh) = core.geometry.current() {
        stats.vertices = mesh.vertex_count() as u32;
        stats.indices = mesh.index_count() as u32;
    }
    stats.geometry_generation = core.geometry.generation() as u32;
    stats.geometry_released = core.geometry.released() as u32;

    let bodies = core.chain.handles().filter_map(|h| core.world.body(h));
    for body in bodies {
        if body.is_sleeping() {
            stats.sleeping_bodies += 1;
        }
        if body.body_type() == BodyMode::KinematicPosition {
            stats.kinematic_bodies += 1;
        }
    }
}
