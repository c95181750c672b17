//! Control polygon for the ribbon.
//!
//! Six points, card end first:
//! `[j3, j3 + 0.15 d, j3 + 0.35 d, smoothed j2, smoothed j1, anchor]`
//! where `d` is the ribbon direction leaving the card clip. The two short
//! steps make the ribbon leave the clip along `d` regardless of where the
//! free joints are.

use glam::Vec3;

use crate::chain::Chain;
use crate::physics::{PhysicsWorld, RigidBodyApi};

use super::spline::CatmullRom;

/// Number of spans sampled from the control curve (samples = this + 1).
pub const CURVE_SAMPLES: usize = 48;
pub const CONTROL_POINTS: usize = 6;
pub const FIRST_STEP: f32 = 0.15;
pub const SECOND_STEP: f32 = 0.20;

#[derive(Clone, Debug, Default)]
pub struct CurveSampler {
    control: [Vec3; CONTROL_POINTS],
    samples: Vec<Vec3>,
}

impl CurveSampler {
    pub fn new() -> Self {
        Self {
            control: [Vec3::ZERO; CONTROL_POINTS],
            samples: Vec::with_capacity(CURVE_SAMPLES + 1),
        }
    }

    pub fn control_points(&self) -> &[Vec3; CONTROL_POINTS] {
        &self.control
    }

    /// Sampled points from the last successful [`CurveSampler::update`].
    pub fn samples(&self) -> &[Vec3] {
        &self.samples
    }

    /// Control points from explicit inputs.
    pub fn control_polygon(last_joint: Vec3, direction: Vec3, free_joints: [Vec3; 2], anchor: Vec3) -> [Vec3; CONTROL_POINTS] {
        let first = last_joint + direction * FIRST_STEP;
        let second = first + direction * SECOND_STEP;
        let [near, far] = free_joints;
        [last_joint, first, second, near, far, anchor]
    }

    /// Rebuild control points from the chain and resample.
    ///
    /// Returns `false` (keeping the previous samples) when a body is missing.
    pub fn update<W: PhysicsWorld>(&mut self, world: &W, chain: &Chain, direction: Vec3) -> bool {
        let Some(last_joint) = world.body(chain.last_joint()).map(|b| b.translation()) else {
            return false;
        };
        let Some(anchor) = world.body(chain.anchor()).map(|b| b.translation()) else {
            return false;
        };
        // Free joints nearest the card first.
        let mut free = chain.free_joint_indices().rev().filter_map(|i| chain.smoothed(i));
        let (Some(near), Some(far)) = (free.next(), free.next()) else {
            return false;
        };
        self.control = Self::control_polygon(last_joint, direction, [near, far], anchor);
        self.resample();
        true
    }

    fn resample(&mut self) {
        self.samples.clear();
        if let Some(curve) = CatmullRom::new(self.control.to_vec()) {
            self.samples.extend(curve.samples(CURVE_SAMPLES));
        }
    }
}
