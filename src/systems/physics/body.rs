use glam::{Quat, Vec3};

use super::{BodyDesc, BodyMode, ColliderShape, RigidBodyApi};

/// One simulated body.
#[derive(Clone, Debug)]
pub struct SimBody {
    pub(super) mode: BodyMode,
    pub(super) translation: Vec3,
    pub(super) rotation: Quat,
    pub(super) linvel: Vec3,
    pub(super) angvel: Vec3,

    // Pose at the start of the substep, for velocity derivation.
    pub(super) substep_translation: Vec3,
    pub(super) substep_rotation: Quat,
    // Pose at the start of the step, for render interpolation.
    pub(super) step_translation: Vec3,
    pub(super) step_rotation: Quat,

    pub(super) inv_mass: f32,
    /// Inverse principal inertia, body-local.
    pub(super) inv_inertia: Vec3,
    pub(super) linear_damping: f32,
    pub(super) angular_damping: f32,

    pub(super) kinematic_translation: Option<Vec3>,
    pub(super) kinematic_rotation: Option<Quat>,
    // Kinematic motion of the current step: (from, to).
    pub(super) kinematic_path: Option<((Vec3, Quat), (Vec3, Quat))>,
    // Orientation a dynamic body is held at; translation stays free.
    pub(super) locked_rotation: Option<Quat>,

    pub(super) shape: ColliderShape,
    pub(super) can_sleep: bool,
    pub(super) sleeping: bool,
    pub(super) sleep_timer: f32,
}

impl SimBody {
    pub fn from_desc(desc: &BodyDesc) -> Self {
        let mass = (desc.shape.volume() * desc.density).max(1e-6);
        let inertia = desc.shape.principal_inertia(mass).max(Vec3::splat(1e-9));
        let rotation = desc.rotation.normalize();
        Self {
            mode: desc.mode,
            translation: desc.translation,
            rotation,
            linvel: Vec3::ZERO,
            angvel: Vec3::ZERO,
            substep_translation: desc.translation,
            substep_rotation: rotation,
            step_translation: desc.translation,
            step_rotation: rotation,
            inv_mass: 1.0 / mass,
            inv_inertia: inertia.recip(),
            linear_damping: desc.linear_damping.max(0.0),
            angular_damping: desc.angular_damping.max(0.0),
            kinematic_translation: None,
            kinematic_rotation: None,
            kinematic_path: None,
            locked_rotation: None,
            shape: desc.shape,
            can_sleep: desc.can_sleep,
            sleeping: false,
            sleep_timer: 0.0,
        }
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.mode == BodyMode::Dynamic
    }

    #[inline]
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    #[inline]
    pub fn linvel(&self) -> Vec3 {
        self.linvel
    }

    pub fn shape(&self) -> ColliderShape {
        self.shape
    }

    /// Teleport; also resets the interpolation origin.
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.step_translation = translation;
        self.substep_translation = translation;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        let rotation = rotation.normalize();
        self.rotation = rotation;
        self.step_rotation = rotation;
        self.substep_rotation = rotation;
    }

    /// True when constraint corrections move this body.
    #[inline]
    pub(super) fn is_solvable(&self) -> bool {
        self.is_dynamic() && !self.sleeping
    }

    pub(super) fn has_pending_target(&self) -> bool {
        self.kinematic_translation.is_some() || self.kinematic_rotation.is_some()
    }

    pub(super) fn mark_step_start(&mut self) {
        self.step_translation = self.translation;
        self.step_rotation = self.rotation;
    }

    fn inv_inertia_world(&self, v: Vec3) -> Vec3 {
        let local = self.rotation.inverse() * v;
        self.rotation * (local * self.inv_inertia)
    }

    /// Resistance of the point at offset `r` to motion along unit `n`.
    pub(super) fn generalized_inverse_mass(&self, r: Vec3, n: Vec3) -> f32 {
        if !self.is_solvable() {
            return 0.0;
        }
        if self.locked_rotation.is_some() {
            return self.inv_mass;
        }
        let rn = r.cross(n);
        self.inv_mass + rn.dot(self.inv_inertia_world(rn))
    }

    /// Apply positional impulse `p` at world offset `r` from the center.
    pub(super) fn apply_positional_impulse(&mut self, p: Vec3, r: Vec3) {
        if !self.is_solvable() {
            return;
        }
        self.translation += p * self.inv_mass;
        if self.locked_rotation.is_some() {
            return;
        }
        let dw = self.inv_inertia_world(r.cross(p));
        self.rotation = integrate_rotation(self.rotation, dw, 1.0);
    }

    pub(super) fn integrate(&mut self, gravity: Vec3, h: f32) {
        self.substep_translation = self.translation;
        self.substep_rotation = self.rotation;
        if !self.is_solvable() {
            return;
        }
        self.linvel += gravity * h;
        self.linvel *= 1.0 / (1.0 + h * self.linear_damping);
        self.angvel *= 1.0 / (1.0 + h * self.angular_damping);
        self.translation += self.linvel * h;
        match self.locked_rotation {
            Some(locked) => {
                self.angvel = Vec3::ZERO;
                self.rotation = locked;
            }
            None => self.rotation = integrate_rotation(self.rotation, self.angvel, h),
        }
    }

    /// Move a kinematic body along this step's path; `s` in 0..=1.
    pub(super) fn follow_kinematic_path(&mut self, s: f32) {
        if let Some(((from_t, from_q), (to_t, to_q))) = self.kinematic_path {
            self.translation = from_t.lerp(to_t, s);
            self.rotation = from_q.slerp(to_q, s).normalize();
        }
    }

    /// Rebuild velocities from the substep's displacement.
    pub(super) fn derive_velocity(&mut self, h: f32) {
        if self.mode == BodyMode::Fixed || self.sleeping || h <= 0.0 {
            return;
        }
        self.linvel = (self.translation - self.substep_translation) / h;
        if self.locked_rotation.is_some() {
            self.angvel = Vec3::ZERO;
            return;
        }
        let dq = self.rotation * self.substep_rotation.inverse();
        let w = Vec3::new(dq.x, dq.y, dq.z) * (2.0 / h);
        self.angvel = if dq.w >= 0.0 { w } else { -w };
    }

    pub(super) fn put_to_sleep(&mut self) {
        self.sleeping = true;
        self.linvel = Vec3::ZERO;
        self.angvel = Vec3::ZERO;
    }
}

/// First-order quaternion update by angular displacement `w * h`.
fn integrate_rotation(q: Quat, w: Vec3, h: f32) -> Quat {
    let spin = Quat::from_xyzw(w.x, w.y, w.z, 0.0) * q;
    let half = 0.5 * h;
    Quat::from_xyzw(
        q.x + spin.x * half,
        q.y + spin.y * half,
        q.z + spin.z * half,
        q.w + spin.w * half,
    )
    .normalize()
}

impl RigidBodyApi for SimBody {
    fn translation(&self) -> Vec3 {
        self.translation
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn angvel(&self) -> Vec3 {
        self.angvel
    }

    fn set_angvel(&mut self, angvel: Vec3, wake_up: bool) {
        if self.mode != BodyMode::Dynamic {
            return;
        }
        self.angvel = angvel;
        if wake_up {
            self.wake_up();
        }
    }

    fn body_type(&self) -> BodyMode {
        self.mode
    }

    fn set_body_type(&mut self, mode: BodyMode, wake_up: bool) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        if mode == BodyMode::Fixed {
            self.linvel = Vec3::ZERO;
            self.angvel = Vec3::ZERO;
        }
        if mode != BodyMode::KinematicPosition {
            self.kinematic_translation = None;
            self.kinematic_rotation = None;
        }
        if wake_up {
            self.wake_up();
        }
    }

    fn set_next_kinematic_translation(&mut self, translation: Vec3) {
        if self.mode == BodyMode::KinematicPosition {
            self.kinematic_translation = Some(translation);
        }
    }

    fn set_next_kinematic_rotation(&mut self, rotation: Quat) {
        if self.mode == BodyMode::KinematicPosition {
            self.kinematic_rotation = Some(rotation.normalize());
        }
    }

    fn locked_rotation(&self) -> Option<Quat> {
        self.locked_rotation
    }

    fn set_locked_rotation(&mut self, rotation: Option<Quat>) {
        self.locked_rotation = rotation.map(Quat::normalize);
    }

    fn wake_up(&mut self) {
        self.sleeping = false;
        self.sleep_timer = 0.0;
    }
}
