//! Physics seam.
//!
//! The ribbon pipeline only talks to physics through [`PhysicsWorld`] and
//! [`RigidBodyApi`]. [`LanyardWorld`] is the in-crate implementation: a
//! position-based solver for a handful of bodies joined by rope and spherical
//! joints. It has no collision detection.
//!
//! Every accessor is keyed by [`BodyHandle`]; a handle that no longer resolves
//! yields `None`, and callers treat that as a no-op.

mod body;
mod joints;
mod world;

use glam::{Quat, Vec3};

pub use body::SimBody;
pub use joints::{Joint, RopeJoint, SphericalJoint};
pub use world::{LanyardWorld, WorldParams};

/// Stable index of a body inside its world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyMode {
    /// Integrated under gravity and joint forces.
    Dynamic,
    /// Never moves.
    Fixed,
    /// Moved only through next-kinematic targets; infinite mass to joints.
    KinematicPosition,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColliderShape {
    Ball { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

impl ColliderShape {
    pub fn volume(&self) -> f32 {
        match *self {
            ColliderShape::Ball { radius } => 4.0 / 3.0 * std::f32::consts::PI * radius.powi(3),
            ColliderShape::Cuboid { half_extents: h } => 8.0 * h.x * h.y * h.z,
        }
    }

    /// Principal moments of inertia for the given mass.
    pub fn principal_inertia(&self, mass: f32) -> Vec3 {
        match *self {
            ColliderShape::Ball { radius } => Vec3::splat(0.4 * mass * radius * radius),
            ColliderShape::Cuboid { half_extents: h } => {
                let s = h * h;
                Vec3::new(s.y + s.z, s.x + s.z, s.x + s.y) * (mass / 3.0)
            }
        }
    }
}

/// Everything needed to insert one body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDesc {
    pub mode: BodyMode,
    pub translation: Vec3,
    pub rotation: Quat,
    pub shape: ColliderShape,
    pub density: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub can_sleep: bool,
}

impl BodyDesc {
    pub fn new(mode: BodyMode, translation: Vec3, shape: ColliderShape) -> Self {
        Self {
            mode,
            translation,
            rotation: Quat::IDENTITY,
            shape,
            density: 1.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            can_sleep: true,
        }
    }

    pub fn damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }
}

/// Per-body surface the ribbon pipeline needs.
pub trait RigidBodyApi {
    fn translation(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    fn angvel(&self) -> Vec3;
    fn set_angvel(&mut self, angvel: Vec3, wake_up: bool);
    fn body_type(&self) -> BodyMode;
    fn set_body_type(&mut self, mode: BodyMode, wake_up: bool);
    fn set_next_kinematic_translation(&mut self, translation: Vec3);
    fn set_next_kinematic_rotation(&mut self, rotation: Quat);
    fn locked_rotation(&self) -> Option<Quat>;
    /// Hold a body at `rotation` (or let it turn again with `None`). Joints
    /// and gravity still move its translation.
    fn set_locked_rotation(&mut self, rotation: Option<Quat>);
    fn wake_up(&mut self);
}

/// World surface: body lookup, stepping and joint creation.
pub trait PhysicsWorld {
    type Body: RigidBodyApi;

    fn body(&self, handle: BodyHandle) -> Option<&Self::Body>;
    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Self::Body>;
    fn step(&mut self, dt: f32);

    fn insert_body(&mut self, desc: BodyDesc) -> BodyHandle;
    /// Keeps the two body centers at most `max_length` apart.
    fn insert_rope_joint(&mut self, a: BodyHandle, b: BodyHandle, max_length: f32) -> bool;
    /// Pins `local_a` on `a` to `local_b` on `b`.
    fn insert_spherical_joint(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        local_a: Vec3,
        local_b: Vec3,
    ) -> bool;

    /// Pose to draw between two steps. Worlds without history return the
    /// committed pose.
    fn interpolated_pose(&self, handle: BodyHandle, _alpha: f32) -> Option<(Vec3, Quat)> {
        self.body(handle).map(|b| (b.translation(), b.rotation()))
    }
}
