use glam::Vec3;

use super::body::SimBody;
use super::BodyHandle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RopeJoint {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub max_length: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalJoint {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub local_a: Vec3,
    pub local_b: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Joint {
    Rope(RopeJoint),
    Spherical(SphericalJoint),
}

impl Joint {
    pub fn bodies(&self) -> (BodyHandle, BodyHandle) {
        match self {
            Joint::Rope(j) => (j.a, j.b),
            Joint::Spherical(j) => (j.a, j.b),
        }
    }

    /// Project the joint's position error out of the two bodies.
    pub(super) fn solve(&self, bodies: &mut [SimBody]) {
        let (a, b) = self.bodies();
        let Some((body_a, body_b)) = pair_mut(bodies, a.index(), b.index()) else {
            return;
        };
        match self {
            Joint::Rope(rope) => {
                let delta = body_b.translation - body_a.translation;
                let dist = delta.length();
                if dist <= rope.max_length || dist < 1e-9 {
                    return;
                }
                correct(body_a, body_b, Vec3::ZERO, Vec3::ZERO, delta / dist, dist - rope.max_length);
            }
            Joint::Spherical(sph) => {
                let r_a = body_a.rotation * sph.local_a;
                let r_b = body_b.rotation * sph.local_b;
                let delta = (body_b.translation + r_b) - (body_a.translation + r_a);
                let err = delta.length();
                if err < 1e-9 {
                    return;
                }
                correct(body_a, body_b, r_a, r_b, delta / err, err);
            }
        }
    }
}

/// Close a gap of `c` along unit `n` (pointing from a's anchor to b's).
fn correct(a: &mut SimBody, b: &mut SimBody, r_a: Vec3, r_b: Vec3, n: Vec3, c: f32) {
    let w = a.generalized_inverse_mass(r_a, n) + b.generalized_inverse_mass(r_b, n);
    if w <= 0.0 {
        return;
    }
    let p = n * (c / w);
    a.apply_positional_impulse(p, r_a);
    b.apply_positional_impulse(-p, r_b);
}

fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> Option<(&mut T, &mut T)> {
    if i == j || i >= items.len() || j >= items.len() {
        return None;
    }
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        Some((&mut lo[i], &mut hi[0]))
    } else {
        let (lo, hi) = items.split_at_mut(i);
        Some((&mut hi[0], &mut lo[j]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyDesc, BodyMode, ColliderShape};

    fn ball(mode: BodyMode, at: Vec3) -> SimBody {
        SimBody::from_desc(&BodyDesc::new(mode, at, ColliderShape::Ball { radius: 0.1 }))
    }

    #[test]
    fn pair_mut_returns_both_orders() {
        let mut v = [1, 2, 3];
        let (a, b) = pair_mut(&mut v, 2, 0).unwrap();
        assert_eq!((*a, *b), (3, 1));
        assert!(pair_mut(&mut v, 1, 1).is_none());
        assert!(pair_mut(&mut v, 0, 3).is_none());
    }

    #[test]
    fn slack_rope_does_nothing() {
        let mut bodies = vec![
            ball(BodyMode::Dynamic, Vec3::ZERO),
            ball(BodyMode::Dynamic, Vec3::new(0.5, 0.0, 0.0)),
        ];
        Joint::Rope(RopeJoint { a: BodyHandle(0), b: BodyHandle(1), max_length: 1.0 }).solve(&mut bodies);
        assert_eq!(bodies[1].translation, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn taut_rope_only_moves_the_dynamic_side() {
        let mut bodies = vec![
            ball(BodyMode::Fixed, Vec3::ZERO),
            ball(BodyMode::Dynamic, Vec3::new(2.0, 0.0, 0.0)),
        ];
        Joint::Rope(RopeJoint { a: BodyHandle(0), b: BodyHandle(1), max_length: 1.0 }).solve(&mut bodies);
        assert_eq!(bodies[0].translation, Vec3::ZERO);
        assert!((bodies[1].translation.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn spherical_joint_closes_anchor_gap() {
        let mut bodies = vec![
            ball(BodyMode::KinematicPosition, Vec3::ZERO),
            SimBody::from_desc(&BodyDesc::new(
                BodyMode::Dynamic,
                Vec3::new(0.0, -2.0, 0.0),
                ColliderShape::Cuboid { half_extents: Vec3::new(0.8, 1.125, 0.01) },
            )),
        ];
        let joint = Joint::Spherical(SphericalJoint {
            a: BodyHandle(0),
            b: BodyHandle(1),
            local_a: Vec3::ZERO,
            local_b: Vec3::new(0.0, 1.5, 0.0),
        });
        for _ in 0..20 {
            joint.solve(&mut bodies);
        }
        let anchor_b = bodies[1].translation + bodies[1].rotation * Vec3::new(0.0, 1.5, 0.0);
        assert!(anchor_b.length() < 1e-3);
    }
}
