//! Glitter background inputs.
//!
//! The fragment shader itself lives with the renderer. This side owns the
//! uniform block it reads each frame and the random noise texture it samples.

use serde::Serialize;

use crate::config::GlitterSettings;
use crate::core::random::{stream_seed, xorshift32};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Side of the square noise texture, in texels.
pub const NOISE_TEXTURE_SIZE: usize = 512;

/// Uniform block in shader order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlitterUniforms {
    pub i_time: f32,
    pub i_resolution: [f32; 3],
    pub i_mouse: [f32; 4],
    #[serde(flatten)]
    pub settings: GlitterSettings,
}

#[derive(Clone, Debug)]
pub struct GlitterBackground {
    uniforms: GlitterUniforms,
    noise: Vec<u8>,
    visible: bool,
}

impl GlitterBackground {
    pub fn new(settings: GlitterSettings, seed: u32) -> Self {
        Self {
            uniforms: GlitterUniforms {
                i_time: 0.0,
                i_resolution: [1.0, 1.0, 1.0],
                i_mouse: [0.0; 4],
                settings,
            },
            noise: generate_noise_texture(NOISE_TEXTURE_SIZE, seed),
            visible: false,
        }
    }

    pub fn uniforms(&self) -> &GlitterUniforms {
        &self.uniforms
    }

    pub fn noise(&self) -> &[u8] {
        &self.noise
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn apply_settings(&mut self, settings: &GlitterSettings) {
        self.uniforms.settings = settings.clone();
    }

    /// Per-frame update. `pointer` is in NDC (-1..1 on both axes).
    pub fn update(&mut self, elapsed: f32, width: f32, height: f32, pointer: [f32; 2]) {
        let u = &mut self.uniforms;
        u.i_time = elapsed;
        u.i_resolution = [width, height, 1.0];
        u.i_mouse = [
            (pointer[0] + 1.0) * 0.5 * width,
            (pointer[1] + 1.0) * 0.5 * height,
            0.0,
            0.0,
        ];
    }

    pub fn uniforms_json(&self) -> String {
        serde_json::to_string(&self.uniforms).unwrap_or_else(|_| "{}".to_string())
    }
}

/// RGBA noise, random RGB and opaque alpha. Each row has its own generator so
/// rows can be filled in any order with the same result.
pub fn generate_noise_texture(size: usize, seed: u32) -> Vec<u8> {
    let row_bytes = size * 4;
    let mut data = vec![0u8; row_bytes * size];
    if row_bytes == 0 {
        return data;
    }

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(row, texels)| fill_row(texels, seed, row as u32));

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(row, texels)| fill_row(texels, seed, row as u32));

    data
}

fn fill_row(texels: &mut [u8], seed: u32, row: u32) {
    let mut state = stream_seed(seed, row);
    for texel in texels.chunks_exact_mut(4) {
        let bits = xorshift32(&mut state).to_le_bytes();
        texel[0] = bits[0];
        texel[1] = bits[1];
        texel[2] = bits[2];
        texel[3] = 255;
    }
}
