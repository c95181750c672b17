//! Keeps the ribbon from twisting where it leaves the card.
//!
//! Each tick the last joint is held at the card's orientation plus the
//! configured ribbon offset. Its translation stays with the rope and the clip
//! joint, so the chain keeps carrying the card. The same offset yields the
//! ribbon direction (how the band leaves the clip) and the reference up used
//! for every ribbon frame.

use glam::{Quat, Vec3};

use crate::chain::Chain;
use crate::config::RotationOffset;
use crate::core::math::normalize_or;
use crate::physics::{PhysicsWorld, RigidBodyApi};

/// Per-tick lerp factor for the free joints' smoothed positions.
pub const SMOOTHING: f32 = 0.1;
/// Fraction of the card's orientation `y` removed from its spin each tick.
pub const SPIN_DAMPING: f32 = 0.25;
/// Card-derived orientation signals for the rest of the pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub card_rotation: Quat,
    pub adjusted_rotation: Quat,
    pub ribbon_direction: Vec3,
    pub reference_up: Vec3,
}

/// `q_card * Ry * (Rx * Rz)`.
pub fn adjusted_rotation(card: Quat, offset: &RotationOffset) -> Quat {
    card * offset.y_rotation() * offset.xz_rotation()
}

/// +Y rotated about Y, then X, then Z, then by the card.
pub fn ribbon_direction(card: Quat, offset: &RotationOffset) -> Vec3 {
    let local = offset.z_rotation() * offset.x_rotation() * offset.y_rotation() * Vec3::Y;
    normalize_or(card * local, Vec3::Y)
}

/// +Z rotated about X, then Y, then Z, then by the card.
pub fn reference_up(card: Quat, offset: &RotationOffset) -> Vec3 {
    let local = offset.z_rotation() * offset.y_rotation() * offset.x_rotation() * Vec3::Z;
    normalize_or(card * local, Vec3::Z)
}

pub fn orientation(card: Quat, offset: &RotationOffset) -> Orientation {
    Orientation {
        card_rotation: card,
        adjusted_rotation: adjusted_rotation(card, offset),
        ribbon_direction: ribbon_direction(card, offset),
        reference_up: reference_up(card, offset),
    }
}

#[derive(Clone, Debug, Default)]
pub struct OrientationStabilizer {
    /// Rotation lock the last joint had before it was first held.
    prior_lock: Option<Option<Quat>>,
}

impl OrientationStabilizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_holding(&self) -> bool {
        self.prior_lock.is_some()
    }

    /// Advance the free joints' smoothed positions toward their raw ones.
    pub fn smooth_free_joints<W: PhysicsWorld>(world: &W, chain: &mut Chain) {
        for index in chain.free_joint_indices() {
            let Some(handle) = chain.node(index).map(|n| n.handle) else { continue };
            if let Some(raw) = world.body(handle).map(|b| b.translation()) {
                chain.smooth_toward(index, raw, SMOOTHING);
            }
        }
    }

    /// Read-only orientation of the card; `None` when the card is gone.
    pub fn observe<W: PhysicsWorld>(world: &W, chain: &Chain, offset: &RotationOffset) -> Option<Orientation> {
        world.body(chain.card()).map(|card| orientation(card.rotation(), offset))
    }

    /// Full stabilizer pass: smooth, hold the last joint's rotation, damp
    /// card spin.
    pub fn update<W: PhysicsWorld>(
        &mut self,
        world: &mut W,
        chain: &mut Chain,
        offset: &RotationOffset,
    ) -> Option<Orientation> {
        Self::smooth_free_joints(world, chain);

        let q_card = world.body(chain.card())?.rotation();
        let out = orientation(q_card, offset);

        if let Some(joint) = world.body_mut(chain.last_joint()) {
            if self.prior_lock.is_none() {
                self.prior_lock = Some(joint.locked_rotation());
                log::debug!("last joint held to card orientation");
            }
            joint.set_locked_rotation(Some(out.adjusted_rotation));
        }

        if let Some(card) = world.body_mut(chain.card()) {
            let mut angvel = card.angvel();
            angvel.y -= SPIN_DAMPING * q_card.y;
            card.set_angvel(angvel, false);
        }

        Some(out)
    }

    /// Let the last joint turn freely again.
    pub fn release<W: PhysicsWorld>(&mut self, world: &mut W, chain: &Chain) {
        let Some(lock) = self.prior_lock.take() else { return };
        if let Some(joint) = world.body_mut(chain.last_joint()) {
            joint.set_locked_rotation(lock);
            joint.wake_up();
            log::debug!("last joint released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainNode;
    use crate::physics::{BodyDesc, BodyHandle, BodyMode, ColliderShape, LanyardWorld, WorldParams};

    fn scene() -> (LanyardWorld, Chain) {
        let mut world = LanyardWorld::new(WorldParams::default());
        let mut nodes = Vec::new();
        for i in 0..5 {
            let at = Vec3::new(0.5 * i as f32, 4.0, 0.0);
            let mode = if i == 0 { BodyMode::Fixed } else { BodyMode::Dynamic };
            let shape = if i == 4 {
                ColliderShape::Cuboid { half_extents: Vec3::new(0.8, 1.125, 0.01) }
            } else {
                ColliderShape::Ball { radius: 0.1 }
            };
            let h = world.insert_body(BodyDesc::new(mode, at, shape));
            nodes.push(ChainNode::new(h, at));
        }
        let chain = Chain::new(nodes).unwrap();
        for i in 0..3 {
            world.insert_rope_joint(chain.node(i).unwrap().handle, chain.node(i + 1).unwrap().handle, 1.0);
        }
        world.insert_spherical_joint(chain.last_joint(), chain.card(), Vec3::ZERO, Vec3::new(0.0, 1.5, 0.0));
        (world, chain)
    }

    #[test]
    fn zero_offset_matches_card() {
        let q = Quat::from_euler(glam::EulerRot::XYZ, 0.3, -0.7, 0.2);
        let o = orientation(q, &RotationOffset::ZERO);
        assert!(o.adjusted_rotation.abs_diff_eq(q, 1e-5));
        assert!((o.ribbon_direction - q * Vec3::Y).length() < 1e-5);
        assert!((o.reference_up - q * Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn y_only_offset_keeps_direction_and_turns_up() {
        let offset = RotationOffset::new(0.0, 0.12, 0.0);
        let o = orientation(Quat::IDENTITY, &offset);
        let expected_q = Quat::from_rotation_y(0.12 * std::f32::consts::PI);
        assert!(o.adjusted_rotation.abs_diff_eq(expected_q, 1e-5));
        // rotating +Y about Y leaves it unchanged
        assert!((o.ribbon_direction - Vec3::Y).length() < 1e-5);
        assert!((o.reference_up - expected_q * Vec3::Z).length() < 1e-5);
        let first = Vec3::ZERO + o.ribbon_direction * crate::curve::FIRST_STEP;
        assert!((first - Vec3::new(0.0, 0.15, 0.0)).length() < 1e-5);
    }

    #[test]
    fn outputs_are_unit_length() {
        let offset = RotationOffset::new(0.3, 0.5, -0.25);
        let q = Quat::from_euler(glam::EulerRot::YXZ, 1.0, 0.4, -0.2);
        let o = orientation(q, &offset);
        assert!((o.ribbon_direction.length() - 1.0).abs() < 1e-5);
        assert!((o.reference_up.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn update_holds_last_joint_rotation_and_release_frees_it() {
        let (mut world, mut chain) = scene();
        let mut stab = OrientationStabilizer::new();
        let offset = RotationOffset::new(0.25, 0.12, 0.0);
        let out = stab.update(&mut world, &mut chain, &offset).unwrap();
        assert!(stab.is_holding());

        let joint = world.body(chain.last_joint()).unwrap();
        assert_eq!(joint.body_type(), BodyMode::Dynamic);
        assert_eq!(joint.locked_rotation(), Some(out.adjusted_rotation.normalize()));

        world.step(1.0 / 60.0);
        let joint = world.body(chain.last_joint()).unwrap();
        assert!(joint.rotation().abs_diff_eq(out.adjusted_rotation, 1e-5));

        stab.release(&mut world, &chain);
        assert!(world.body(chain.last_joint()).unwrap().locked_rotation().is_none());
        assert!(!stab.is_holding());
    }

    #[test]
    fn spin_damping_uses_orientation_y() {
        let (mut world, mut chain) = scene();
        let q = Quat::from_rotation_y(0.5);
        world.body_mut(chain.card()).unwrap().set_rotation(q);
        world.body_mut(chain.card()).unwrap().set_angvel(Vec3::new(0.0, 1.0, 0.0), true);
        OrientationStabilizer::new().update(&mut world, &mut chain, &RotationOffset::ZERO);
        let w = world.body(chain.card()).unwrap().angvel();
        assert!((w.y - (1.0 - SPIN_DAMPING * q.y)).abs() < 1e-6);
    }

    #[test]
    fn missing_card_is_a_no_op() {
        let (mut world, chain) = scene();
        let broken = Chain::new(vec![
            ChainNode::new(chain.anchor(), Vec3::ZERO),
            ChainNode::new(BodyHandle(1), Vec3::ZERO),
            ChainNode::new(BodyHandle(2), Vec3::ZERO),
            ChainNode::new(BodyHandle(3), Vec3::ZERO),
            ChainNode::new(BodyHandle(40), Vec3::ZERO),
        ]);
        let mut broken = broken.unwrap();
        let mut stab = OrientationStabilizer::new();
        assert!(stab.update(&mut world, &mut broken, &RotationOffset::ZERO).is_none());
        assert!(world.body(BodyHandle(3)).unwrap().locked_rotation().is_none());
    }

    #[test]
    fn free_joints_smooth_toward_raw_positions() {
        let (mut world, mut chain) = scene();
        world.body_mut(BodyHandle(1)).unwrap().set_translation(Vec3::new(0.5, 3.0, 0.0));
        OrientationStabilizer::smooth_free_joints(&world, &mut chain);
        let s = chain.smoothed(1).unwrap();
        assert!((s - Vec3::new(0.5, 3.9, 0.0)).length() < 1e-5);
    }
}
