use glam::{Vec2, Vec3};

use crate::config::BadgeConfig;
use crate::domain::material::BandMaterial;
use crate::ribbon::RibbonParams;

use super::perf_stats::PerfStats;
use super::BadgeCore;

/// Install a new (already clamped) config. Takes effect from the next tick;
/// the chain itself is never respawned.
pub(super) fn apply_config(core: &mut BadgeCore, config: BadgeConfig) {
    core.ribbon_params = RibbonParams::from(&config.band_geometry_props);

    match BandMaterial::from_props(&config.band_material_props) {
        Ok(material) => core.material = material,
        Err(err) => log::warn!("{err}; keeping previous band material"),
    }

    if core.config.stabilize && !config.stabilize {
        core.stabilizer.release(&mut core.world, &core.chain);
    }

    core.background.apply_settings(&config.glitter);
    core.background.set_visible(config.show_glitter);

    if config.debug != core.config.debug {
        log::info!("debug view {}", if config.debug { "on" } else { "off" });
    }
    core.config = config;
    log::debug!("config applied");
}

pub(super) fn set_viewport(core: &mut BadgeCore, width: f32, height: f32) {
    if !(width > 0.0 && height > 0.0) {
        log::warn!("ignoring viewport {width}x{height}");
        return;
    }
    core.viewport = Vec2::new(width, height);
    core.camera.set_viewport(width, height);
}

pub(super) fn set_camera(core: &mut BadgeCore, position: Vec3, fov_y_degrees: f32) {
    if position.is_finite() {
        core.camera.position = position;
    }
    if fov_y_degrees.is_finite() && fov_y_degrees > 0.0 && fov_y_degrees < 180.0 {
        core.camera.fov_y_degrees = fov_y_degrees;
    }
}

pub(super) fn enable_perf_metrics(core: &mut BadgeCore, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(core: &BadgeCore) -> PerfStats {
    core.perf_stats.clone()
}
