//! Tuning surface for the badge.
//!
//! The UI sends the whole config as one JSON object with camelCase keys.
//! Missing keys take their defaults; out-of-range numbers are clamped to the
//! slider ranges the UI exposes. Only malformed JSON and unparsable colors are
//! errors.

use glam::Quat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::math::rotation_pi;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid color `{0}`: expected #rrggbb or #rgb")]
    Color(String),
}

/// Per-axis rotation in half-turns (1.0 = π radians).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationOffset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationOffset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn x_rotation(&self) -> Quat {
        rotation_pi(glam::Vec3::X, self.x)
    }

    pub fn y_rotation(&self) -> Quat {
        rotation_pi(glam::Vec3::Y, self.y)
    }

    pub fn z_rotation(&self) -> Quat {
        rotation_pi(glam::Vec3::Z, self.z)
    }

    /// Euler XYZ rotation built from the x and z components only.
    pub fn xz_rotation(&self) -> Quat {
        self.x_rotation() * self.z_rotation()
    }

    /// Euler XYZ rotation of all three components.
    pub fn euler(&self) -> Quat {
        self.x_rotation() * self.y_rotation() * self.z_rotation()
    }

    fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self { x: fix(self.x), y: fix(self.y), z: fix(self.z) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BandGeometryProps {
    pub band_width: f32,
    pub band_thickness: f32,
    pub texture_repeats: f32,
}

impl Default for BandGeometryProps {
    fn default() -> Self {
        Self {
            band_width: 0.2,
            band_thickness: 0.04,
            texture_repeats: 4.0,
        }
    }
}

impl BandGeometryProps {
    fn clamped(&self) -> Self {
        Self {
            band_width: clamp_or(self.band_width, 0.1, 1.0, 0.2),
            band_thickness: clamp_or(self.band_thickness, 0.01, 0.2, 0.04),
            texture_repeats: clamp_or(self.texture_repeats, 1.0, 10.0, 4.0).round(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BandMaterialProps {
    pub band_color: String,
    pub band_roughness: f32,
    pub band_metalness: f32,
    pub band_clearcoat: f32,
    pub band_clearcoat_roughness: f32,
    pub band_env_map_intensity: f32,
}

impl Default for BandMaterialProps {
    fn default() -> Self {
        Self {
            band_color: "#ffffff".to_string(),
            band_roughness: 0.8,
            band_metalness: 0.8,
            band_clearcoat: 0.1,
            band_clearcoat_roughness: 0.1,
            band_env_map_intensity: 1.2,
        }
    }
}

impl BandMaterialProps {
    fn clamped(&self) -> Self {
        Self {
            band_color: self.band_color.trim().to_string(),
            band_roughness: clamp_or(self.band_roughness, 0.0, 1.0, 0.8),
            band_metalness: clamp_or(self.band_metalness, 0.0, 1.0, 0.8),
            band_clearcoat: clamp_or(self.band_clearcoat, 0.0, 1.0, 0.1),
            band_clearcoat_roughness: clamp_or(self.band_clearcoat_roughness, 0.0, 1.0, 0.1),
            band_env_map_intensity: clamp_or(self.band_env_map_intensity, 0.0, 3.0, 1.2),
        }
    }
}

/// Background shader tunables. Names follow the shader uniforms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlitterSettings {
    pub size: f32,
    pub layers: f32,
    pub intensity: f32,
    pub speed: f32,
    pub red_power: f32,
    pub green_power: f32,
    pub blue_power: f32,
    pub exposure: f32,
    pub brightness: f32,
    pub saturation: f32,
    pub contrast: f32,
    pub displacement_scale: f32,
    pub displacement_speed: f32,
    pub displacement_strength: f32,
    pub noise_scale: f32,
    pub noise_speed: f32,
}

impl Default for GlitterSettings {
    fn default() -> Self {
        Self {
            size: 0.005,
            layers: 3.0,
            intensity: 12.0,
            speed: 0.0,
            red_power: 0.35,
            green_power: 0.4,
            blue_power: 1.8,
            exposure: 2.0,
            brightness: 1.8,
            saturation: 1.6,
            contrast: 1.2,
            displacement_scale: 1.5,
            displacement_speed: 0.08,
            displacement_strength: 0.055,
            noise_scale: 2.0,
            noise_speed: 0.05,
        }
    }
}

impl GlitterSettings {
    fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            size: clamp_or(self.size, 0.0005, 0.01, d.size),
            layers: clamp_or(self.layers, 1.0, 5.0, d.layers).round(),
            intensity: clamp_or(self.intensity, 6.0, 20.0, d.intensity),
            speed: clamp_or(self.speed, 0.0, 0.09, d.speed),
            red_power: clamp_or(self.red_power, 0.1, 2.0, d.red_power),
            green_power: clamp_or(self.green_power, 0.1, 2.0, d.green_power),
            blue_power: clamp_or(self.blue_power, 0.1, 2.0, d.blue_power),
            exposure: clamp_or(self.exposure, 0.5, 3.0, d.exposure),
            brightness: clamp_or(self.brightness, 0.5, 3.0, d.brightness),
            saturation: clamp_or(self.saturation, 0.5, 3.0, d.saturation),
            contrast: clamp_or(self.contrast, 0.5, 3.0, d.contrast),
            displacement_scale: clamp_or(self.displacement_scale, 0.5, 3.0, d.displacement_scale),
            displacement_speed: clamp_or(self.displacement_speed, 0.01, 0.2, d.displacement_speed),
            displacement_strength: clamp_or(self.displacement_strength, 0.01, 0.2, d.displacement_strength),
            noise_scale: clamp_or(self.noise_scale, 0.5, 5.0, d.noise_scale),
            noise_speed: clamp_or(self.noise_speed, 0.01, 0.2, d.noise_speed),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BadgeConfig {
    /// Pass-through for the renderer, not read by the ribbon pipeline.
    pub max_speed: f32,
    /// Pass-through for the renderer, not read by the ribbon pipeline.
    pub min_speed: f32,
    pub debug: bool,
    pub ribbon_rotation_offset: RotationOffset,
    /// Rotation of the whole badge group, in half-turns.
    pub rotation: RotationOffset,
    /// Slave the last joint to the card pose each tick.
    pub stabilize: bool,
    pub band_material_props: BandMaterialProps,
    pub band_geometry_props: BandGeometryProps,
    pub show_glitter: bool,
    pub glitter: GlitterSettings,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            max_speed: 20.0,
            min_speed: 10.0,
            debug: false,
            ribbon_rotation_offset: RotationOffset::new(0.0, 0.12, 0.0),
            rotation: RotationOffset::ZERO,
            stabilize: true,
            band_material_props: BandMaterialProps::default(),
            band_geometry_props: BandGeometryProps::default(),
            show_glitter: false,
            glitter: GlitterSettings::default(),
        }
    }
}

impl BadgeConfig {
    /// Parse a config object. The result is already clamped.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BadgeConfig = serde_json::from_str(json)?;
        let config = config.clamped();
        // Surface bad colors here rather than on the next material rebuild.
        parse_hex_color(&config.band_material_props.band_color)?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Copy of the config with every numeric field inside its UI range.
    pub fn clamped(&self) -> Self {
        Self {
            max_speed: clamp_or(self.max_speed, 5.0, 50.0, 20.0),
            min_speed: clamp_or(self.min_speed, 1.0, 20.0, 10.0),
            debug: self.debug,
            ribbon_rotation_offset: self.ribbon_rotation_offset.sanitized(),
            rotation: self.rotation.sanitized(),
            stabilize: self.stabilize,
            band_material_props: self.band_material_props.clamped(),
            band_geometry_props: self.band_geometry_props.clamped(),
            show_glitter: self.show_glitter,
            glitter: self.glitter.clamped(),
        }
    }
}

/// Parse `#rrggbb` / `#rgb` into linear 0..1 components (no gamma applied).
pub fn parse_hex_color(color: &str) -> Result<[f32; 3], ConfigError> {
    let bad = || ConfigError::Color(color.to_string());
    let hex = color.trim().strip_prefix('#').ok_or_else(bad)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| bad());
    let (r, g, b) = match hex.len() {
        6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        3 => {
            let expand = |s: &str| channel(&s.repeat(2));
            (expand(&hex[0..1])?, expand(&hex[1..2])?, expand(&hex[2..3])?)
        }
        _ => return Err(bad()),
    };
    Ok([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

#[inline]
fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() { value.clamp(min, max) } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_tuning_panel() {
        let c = BadgeConfig::default();
        assert_eq!(c.ribbon_rotation_offset, RotationOffset::new(0.0, 0.12, 0.0));
        assert_eq!(c.band_geometry_props.band_width, 0.2);
        assert_eq!(c.band_geometry_props.texture_repeats, 4.0);
        assert_eq!(c.band_material_props.band_color, "#ffffff");
        assert!(c.stabilize);
        assert!(!c.debug);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = BadgeConfig::from_json(r#"{"debug": true, "bandGeometryProps": {"bandWidth": 0.5}}"#)
            .expect("partial config should parse");
        assert!(c.debug);
        assert_eq!(c.band_geometry_props.band_width, 0.5);
        assert_eq!(c.band_geometry_props.band_thickness, 0.04);
        assert_eq!(c.max_speed, 20.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let c = BadgeConfig::from_json(
            r#"{"maxSpeed": 400, "bandGeometryProps": {"bandThickness": 0.0, "textureRepeats": 3.6},
                "glitter": {"layers": 9}}"#,
        )
        .expect("config should parse");
        assert_eq!(c.max_speed, 50.0);
        assert_eq!(c.band_geometry_props.band_thickness, 0.01);
        assert_eq!(c.band_geometry_props.texture_repeats, 4.0);
        assert_eq!(c.glitter.layers, 5.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(BadgeConfig::from_json("{not json"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn bad_color_is_an_error() {
        let err = BadgeConfig::from_json(r#"{"bandMaterialProps": {"bandColor": "white"}}"#);
        assert!(matches!(err, Err(ConfigError::Color(_))));
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("#ffffff").unwrap(), [1.0, 1.0, 1.0]);
        assert_eq!(parse_hex_color("#000").unwrap(), [0.0, 0.0, 0.0]);
        let c = parse_hex_color("#ffc700").unwrap();
        assert!((c[1] - 199.0 / 255.0).abs() < 1e-6);
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
    }

    #[test]
    fn json_round_trips_through_camel_case() {
        let json = BadgeConfig::default().to_json();
        assert!(json.contains("ribbonRotationOffset"));
        assert!(json.contains("bandEnvMapIntensity"));
        let back = BadgeConfig::from_json(&json).unwrap();
        assert_eq!(back, BadgeConfig::default());
    }

    #[test]
    fn zero_offset_rotations_are_identity() {
        let o = RotationOffset::ZERO;
        assert!(o.euler().abs_diff_eq(Quat::IDENTITY, 1e-6));
        assert!(o.xz_rotation().abs_diff_eq(Quat::IDENTITY, 1e-6));
    }
}
