//! Physical material parameters for the band, derived from the tuning props.

use serde::Serialize;

use super::config::{parse_hex_color, BandMaterialProps, ConfigError};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandMaterial {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub env_map_intensity: f32,
    pub double_sided: bool,
    pub repeat_wrap: bool,
}

impl BandMaterial {
    /// The band is always a bit glossier and more metallic than the raw props.
    pub fn from_props(props: &BandMaterialProps) -> Result<Self, ConfigError> {
        Ok(Self {
            color: parse_hex_color(&props.band_color)?,
            roughness: (props.band_roughness * 0.8).min(0.7),
            metalness: (props.band_metalness * 1.1).max(0.5),
            clearcoat: (props.band_clearcoat * 2.0).max(0.3),
            clearcoat_roughness: props.band_clearcoat_roughness,
            env_map_intensity: props.band_env_map_intensity * 1.5,
            double_sided: true,
            repeat_wrap: true,
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for BandMaterial {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            roughness: 0.64,
            metalness: 0.88,
            clearcoat: 0.3,
            clearcoat_roughness: 0.1,
            env_map_intensity: 1.8,
            double_sided: true,
            repeat_wrap: true,
        }
    }
}
