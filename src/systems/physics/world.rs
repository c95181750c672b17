use glam::{Quat, Vec3};

use super::body::SimBody;
use super::joints::{Joint, RopeJoint, SphericalJoint};
use super::{BodyDesc, BodyHandle, BodyMode, PhysicsWorld, RigidBodyApi};

/// Solver tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldParams {
    pub gravity: Vec3,
    pub substeps: u32,
    /// Joint passes per substep.
    pub iterations: u32,
    /// Squared linear + angular speed below which a body counts as resting.
    pub sleep_threshold: f32,
    /// Seconds an island must rest before it sleeps.
    pub time_until_sleep: f32,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -30.0, 0.0),
            substeps: 8,
            iterations: 4,
            sleep_threshold: 0.01,
            time_until_sleep: 0.5,
        }
    }
}

/// Small position-based world for the lanyard chain.
#[derive(Clone, Debug, Default)]
pub struct LanyardWorld {
    params: WorldParams,
    bodies: Vec<SimBody>,
    joints: Vec<Joint>,
    steps: u64,
}

impl LanyardWorld {
    pub fn new(params: WorldParams) -> Self {
        Self {
            params,
            bodies: Vec::new(),
            joints: Vec::new(),
            steps: 0,
        }
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn wake_all(&mut self) {
        for body in &mut self.bodies {
            body.wake_up();
        }
    }

    fn contains(&self, handle: BodyHandle) -> bool {
        handle.index() < self.bodies.len()
    }

    /// Island id per body: bodies connected through joints share an id.
    /// Fixed bodies never connect islands.
    fn islands(&self) -> Vec<usize> {
        let mut parent: Vec<usize> = (0..self.bodies.len()).collect();
        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }
        for joint in &self.joints {
            let (a, b) = joint.bodies();
            let (a, b) = (a.index(), b.index());
            if self.bodies[a].mode == BodyMode::Fixed || self.bodies[b].mode == BodyMode::Fixed {
                continue;
            }
            let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
            if ra != rb {
                parent[ra] = rb;
            }
        }
        (0..self.bodies.len()).map(|i| find(&mut parent, i)).collect()
    }

    fn is_active(body: &SimBody) -> bool {
        match body.mode {
            BodyMode::Fixed => false,
            BodyMode::Dynamic => !body.sleeping,
            BodyMode::KinematicPosition => body.has_pending_target(),
        }
    }

    /// Any active body wakes its whole island.
    fn propagate_wake(&mut self, islands: &[usize]) {
        let mut awake = vec![false; self.bodies.len()];
        for (i, body) in self.bodies.iter().enumerate() {
            if Self::is_active(body) {
                awake[islands[i]] = true;
            }
        }
        for (i, body) in self.bodies.iter_mut().enumerate() {
            if awake[islands[i]] && body.sleeping {
                body.wake_up();
            }
        }
    }

    fn update_sleep(&mut self, islands: &[usize], dt: f32) {
        let threshold = self.params.sleep_threshold;
        for body in &mut self.bodies {
            let speed2 = body.linvel.length_squared() + body.angvel.length_squared();
            if body.mode == BodyMode::Fixed || speed2 >= threshold || !body.can_sleep {
                body.sleep_timer = 0.0;
            } else {
                body.sleep_timer += dt;
            }
        }
        let mut restless = vec![false; self.bodies.len()];
        for (i, body) in self.bodies.iter().enumerate() {
            let rests = match body.mode {
                BodyMode::Fixed => true,
                _ => body.sleep_timer >= self.params.time_until_sleep,
            };
            if !rests {
                restless[islands[i]] = true;
            }
        }
        for (i, body) in self.bodies.iter_mut().enumerate() {
            if body.mode != BodyMode::Fixed && !body.sleeping && !restless[islands[i]] {
                body.put_to_sleep();
            }
        }
    }
}

impl PhysicsWorld for LanyardWorld {
    type Body = SimBody;

    fn body(&self, handle: BodyHandle) -> Option<&SimBody> {
        self.bodies.get(handle.index())
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut SimBody> {
        self.bodies.get_mut(handle.index())
    }

    fn step(&mut self, dt: f32) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }
        let islands = self.islands();
        self.propagate_wake(&islands);

        for body in &mut self.bodies {
            body.mark_step_start();
            body.kinematic_path = None;
            if body.mode == BodyMode::KinematicPosition && body.has_pending_target() {
                let from = (body.translation, body.rotation);
                let to = (
                    body.kinematic_translation.take().unwrap_or(body.translation),
                    body.kinematic_rotation.take().unwrap_or(body.rotation),
                );
                body.kinematic_path = Some((from, to));
            }
        }

        let substeps = self.params.substeps.max(1);
        let h = dt / substeps as f32;
        for s in 0..substeps {
            let progress = (s + 1) as f32 / substeps as f32;
            for body in &mut self.bodies {
                body.integrate(self.params.gravity, h);
                if body.mode == BodyMode::KinematicPosition {
                    body.follow_kinematic_path(progress);
                }
            }
            for _ in 0..self.params.iterations.max(1) {
                for joint in &self.joints {
                    joint.solve(&mut self.bodies);
                }
            }
            for body in &mut self.bodies {
                body.derive_velocity(h);
            }
        }

        for body in &mut self.bodies {
            if body.mode == BodyMode::KinematicPosition && body.kinematic_path.take().is_none() {
                body.linvel = Vec3::ZERO;
                body.angvel = Vec3::ZERO;
            }
        }
        self.update_sleep(&islands, dt);
        self.steps += 1;
    }

    fn insert_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(SimBody::from_desc(&desc));
        handle
    }

    fn insert_rope_joint(&mut self, a: BodyHandle, b: BodyHandle, max_length: f32) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        self.joints.push(Joint::Rope(RopeJoint {
            a,
            b,
            max_length: max_length.max(0.0),
        }));
        true
    }

    fn insert_spherical_joint(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        local_a: Vec3,
        local_b: Vec3,
    ) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        self.joints.push(Joint::Spherical(SphericalJoint { a, b, local_a, local_b }));
        true
    }

    fn interpolated_pose(&self, handle: BodyHandle, alpha: f32) -> Option<(Vec3, Quat)> {
        let body = self.body(handle)?;
        let alpha = alpha.clamp(0.0, 1.0);
        Some((
            body.step_translation.lerp(body.translation(), alpha),
            body.step_rotation.slerp(body.rotation(), alpha).normalize(),
        ))
    }
}
