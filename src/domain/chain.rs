//! The lanyard as an explicit data structure.
//!
//! Nodes are ordered from the fixed anchor to the card:
//! `[anchor, j1, j2, last_joint, card]`. Each node owns its smoothed position,
//! seeded when the node is created, so no stage ever reads an unseeded value.

use glam::Vec3;

use crate::core::math::smooth_toward;
use crate::physics::BodyHandle;

/// Bodies in the standard lanyard: anchor, j1, j2, j3, card.
pub const LANYARD_NODES: usize = 5;

/// One rigid body of the lanyard plus its per-node pipeline state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChainNode {
    pub handle: BodyHandle,
    /// Jitter-filtered translation, consumed by the curve sampler.
    pub smoothed_position: Vec3,
}

impl ChainNode {
    pub fn new(handle: BodyHandle, spawn_position: Vec3) -> Self {
        Self {
            handle,
            smoothed_position: spawn_position,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Chain {
    nodes: Vec<ChainNode>,
    anchor: usize,
    card: usize,
}

impl Chain {
    /// Build a chain from nodes ordered anchor first, card last.
    ///
    /// Returns `None` for fewer than 4 nodes: the curve needs the anchor, two
    /// free joints and the card-side joint.
    pub fn new(nodes: Vec<ChainNode>) -> Option<Self> {
        if nodes.len() < 4 {
            return None;
        }
        let card = nodes.len() - 1;
        Some(Self { nodes, anchor: 0, card })
    }

    /// The standard lanyard: anchor, three free joints, card.
    pub fn lanyard(nodes: [ChainNode; LANYARD_NODES]) -> Self {
        Self {
            nodes: nodes.to_vec(),
            anchor: 0,
            card: LANYARD_NODES - 1,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[ChainNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&ChainNode> {
        self.nodes.get(index)
    }

    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.nodes.iter().map(|n| n.handle)
    }

    pub fn anchor_index(&self) -> usize {
        self.anchor
    }

    pub fn card_index(&self) -> usize {
        self.card
    }

    /// The joint the ribbon leaves from, attached to the card.
    pub fn last_joint_index(&self) -> usize {
        self.card - 1
    }

    pub fn anchor(&self) -> BodyHandle {
        self.nodes[self.anchor].handle
    }

    pub fn card(&self) -> BodyHandle {
        self.nodes[self.card].handle
    }

    pub fn last_joint(&self) -> BodyHandle {
        self.nodes[self.last_joint_index()].handle
    }

    /// Free joints between anchor and last joint, ordered anchor side first.
    pub fn free_joint_indices(&self) -> std::ops::Range<usize> {
        (self.anchor + 1)..self.last_joint_index()
    }

    pub fn smoothed(&self, index: usize) -> Option<Vec3> {
        self.nodes.get(index).map(|n| n.smoothed_position)
    }

    /// Advance the node's smoothed position one step toward `raw`.
    pub fn smooth_toward(&mut self, index: usize, raw: Vec3, alpha: f32) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.smoothed_position = smooth_toward(node.smoothed_position, raw, alpha);
        }
    }
}

/// Spawn layout of the lanyard, in physics space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LanyardLayout {
    /// Position of the fixed anchor.
    pub origin: Vec3,
    /// Horizontal spacing between consecutive bodies at spawn.
    pub spacing: f32,
    /// Max separation of each rope joint.
    pub rope_length: f32,
    /// Spherical joint anchor on the card, card-local.
    pub card_anchor: Vec3,
    pub joint_radius: f32,
    pub card_half_extents: Vec3,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl Default for LanyardLayout {
    fn default() -> Self {
        Self {
            origin: Vec3::new(0.0, 4.0, 0.0),
            spacing: 0.5,
            rope_length: 1.0,
            card_anchor: Vec3::new(0.0, 1.5, 0.0),
            joint_radius: 0.1,
            card_half_extents: Vec3::new(0.8, 1.125, 0.01),
            linear_damping: 3.0,
            angular_damping: 0.8,
        }
    }
}

impl LanyardLayout {
    /// Spawn translation of body `index` (0 = anchor, 4 = card).
    pub fn spawn_position(&self, index: usize) -> Vec3 {
        self.origin + Vec3::X * (self.spacing * index as f32)
    }
}
