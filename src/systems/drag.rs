//! Pointer dragging of the card.
//!
//! Pointer-down on the card captures the offset between the hit point and the
//! card center, plus a camera-facing plane through the hit point. While the
//! drag is active every tick moves the (kinematic) card so that the pointer
//! ray's hit on that plane stays at the same offset from the card.

use glam::{Quat, Vec2, Vec3};
use wasm_bindgen::prelude::*;

use crate::chain::Chain;
use crate::domain::camera::{Plane, Ray};
use crate::physics::{BodyMode, PhysicsWorld, RigidBodyApi};

/// Cursor the presentation layer should show.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    Default = 0,
    Grab = 1,
    Grabbing = 2,
}

impl CursorHint {
    pub fn as_css(self) -> &'static str {
        match self {
            CursorHint::Default => "auto",
            CursorHint::Grab => "grab",
            CursorHint::Grabbing => "grabbing",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    Idle,
    Active {
        /// Hit point minus card translation at pointer-down.
        offset: Vec3,
        plane: Plane,
    },
}

#[derive(Clone, Debug)]
pub struct DragController {
    state: DragState,
    hovered: bool,
    pointer: Option<Ray>,
    /// Half extents of the card's grab rectangle, in card space.
    card_half_extents: Vec2,
}

impl DragController {
    pub fn new(card_half_extents: Vec2) -> Self {
        Self {
            state: DragState::Idle,
            hovered: false,
            pointer: None,
            card_half_extents,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Active { .. })
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn cursor_hint(&self) -> CursorHint {
        match (self.hovered, self.is_dragging()) {
            (false, _) => CursorHint::Default,
            (true, false) => CursorHint::Grab,
            (true, true) => CursorHint::Grabbing,
        }
    }

    /// Point where `ray` hits the card rectangle, if it does.
    pub fn card_hit<W: PhysicsWorld>(&self, world: &W, chain: &Chain, ray: &Ray) -> Option<Vec3> {
        let card = world.body(chain.card())?;
        hit_rectangle(ray, card.translation(), card.rotation(), self.card_half_extents)
    }

    /// Track the pointer and refresh hover state.
    pub fn pointer_move<W: PhysicsWorld>(&mut self, world: &W, chain: &Chain, ray: Ray) {
        // Pointer capture keeps the card hovered for the whole drag.
        self.hovered = self.is_dragging() || self.card_hit(world, chain, &ray).is_some();
        self.pointer = Some(ray);
    }

    /// Start a drag if the ray hits the card. `view_dir` is the camera forward.
    pub fn pointer_down<W: PhysicsWorld>(&mut self, world: &W, chain: &Chain, ray: Ray, view_dir: Vec3) -> bool {
        self.pointer = Some(ray);
        let Some(hit) = self.card_hit(world, chain, &ray) else {
            return false;
        };
        let Some(card) = world.body(chain.card()) else {
            return false;
        };
        let normal = (-view_dir).try_normalize().unwrap_or(-ray.direction);
        self.state = DragState::Active {
            offset: hit - card.translation(),
            plane: Plane { point: hit, normal },
        };
        self.hovered = true;
        log::debug!("drag start at {hit}");
        true
    }

    pub fn pointer_up<W: PhysicsWorld>(&mut self, world: &mut W, chain: &Chain) {
        self.end(world, chain, "pointer up");
    }

    /// Pointer capture lost: same as releasing.
    pub fn pointer_cancel<W: PhysicsWorld>(&mut self, world: &mut W, chain: &Chain) {
        self.end(world, chain, "pointer cancel");
        self.hovered = false;
    }

    fn end<W: PhysicsWorld>(&mut self, world: &mut W, chain: &Chain, why: &str) {
        if !self.is_dragging() {
            return;
        }
        self.state = DragState::Idle;
        if let Some(card) = world.body_mut(chain.card()) {
            card.set_body_type(BodyMode::Dynamic, true);
        }
        log::debug!("drag end ({why})");
    }

    /// Drag target for the current pointer, `None` when idle.
    pub fn target(&self) -> Option<Vec3> {
        let DragState::Active { offset, plane } = self.state else {
            return None;
        };
        let hit = self.pointer?.intersect_plane(&plane)?;
        Some(hit - offset)
    }

    /// Per-tick: wake the chain and steer the card toward the pointer.
    pub fn apply<W: PhysicsWorld>(&self, world: &mut W, chain: &Chain) {
        if !self.is_dragging() {
            return;
        }
        for handle in chain.handles() {
            if let Some(body) = world.body_mut(handle) {
                body.wake_up();
            }
        }
        let target = self.target();
        if let Some(card) = world.body_mut(chain.card()) {
            card.set_body_type(BodyMode::KinematicPosition, true);
            if let Some(target) = target {
                card.set_next_kinematic_translation(target);
            }
        }
    }
}

/// Ray against a rectangle centered at `center`, lying in the rotated XY plane.
pub fn hit_rectangle(ray: &Ray, center: Vec3, rotation: Quat, half_extents: Vec2) -> Option<Vec3> {
    let normal = rotation * Vec3::Z;
    let hit = ray.intersect_plane(&Plane { point: center, normal })?;
    let local = rotation.inverse() * (hit - center);
    (local.x.abs() <= half_extents.x && local.y.abs() <= half_extents.y).then_some(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainNode;
    use crate::physics::{BodyDesc, BodyHandle, ColliderShape, LanyardWorld, WorldParams};

    const CARD: Vec2 = Vec2::new(0.8, 1.125);

    fn scene() -> (LanyardWorld, Chain) {
        let mut world = LanyardWorld::new(WorldParams::default());
        let mut nodes = Vec::new();
        for i in 0..5 {
            let at = Vec3::new(0.0, i as f32, 0.0);
            let mode = if i == 0 { BodyMode::Fixed } else { BodyMode::Dynamic };
            let h = world.insert_body(BodyDesc::new(mode, at, ColliderShape::Ball { radius: 0.1 }));
            nodes.push(ChainNode::new(h, at));
        }
        (world, Chain::new(nodes).unwrap())
    }

    fn ray_to(p: Vec3) -> Ray {
        let origin = Vec3::new(0.0, 0.0, 13.0);
        Ray { origin, direction: (p - origin).normalize() }
    }

    #[test]
    fn cursor_hint_table() {
        let (world, chain) = scene();
        let mut drag = DragController::new(CARD);
        assert_eq!(drag.cursor_hint(), CursorHint::Default);
        drag.pointer_move(&world, &chain, ray_to(Vec3::new(0.3, 4.2, 0.0)));
        assert_eq!(drag.cursor_hint(), CursorHint::Grab);
        assert!(drag.pointer_down(&world, &chain, ray_to(Vec3::new(0.3, 4.2, 0.0)), Vec3::NEG_Z));
        assert_eq!(drag.cursor_hint(), CursorHint::Grabbing);
        assert_eq!(CursorHint::Grabbing.as_css(), "grabbing");
    }

    #[test]
    fn pointer_down_off_card_does_not_start() {
        let (world, chain) = scene();
        let mut drag = DragController::new(CARD);
        assert!(!drag.pointer_down(&world, &chain, ray_to(Vec3::new(3.0, 4.0, 0.0)), Vec3::NEG_Z));
        assert_eq!(*drag.state(), DragState::Idle);
    }

    #[test]
    fn unmoved_pointer_targets_current_card_position() {
        let (world, chain) = scene();
        let mut drag = DragController::new(CARD);
        let hit = Vec3::new(-0.5, 3.5, 0.0);
        assert!(drag.pointer_down(&world, &chain, ray_to(hit), Vec3::NEG_Z));
        let target = drag.target().unwrap();
        assert!((target - Vec3::new(0.0, 4.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn drag_round_trip_is_exact() {
        let (mut world, chain) = scene();
        let mut drag = DragController::new(CARD);
        let start = Vec3::new(0.2, 4.5, 0.0);
        assert!(drag.pointer_down(&world, &chain, ray_to(start), Vec3::NEG_Z));
        drag.pointer_move(&world, &chain, ray_to(start + Vec3::new(1.0, -2.0, 0.0)));
        drag.apply(&mut world, &chain);
        assert_eq!(world.body(chain.card()).unwrap().body_type(), BodyMode::KinematicPosition);
        world.step(1.0 / 60.0);
        assert!((world.body(chain.card()).unwrap().translation() - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-3);

        drag.pointer_move(&world, &chain, ray_to(start));
        drag.apply(&mut world, &chain);
        world.step(1.0 / 60.0);
        assert!((world.body(chain.card()).unwrap().translation() - Vec3::new(0.0, 4.0, 0.0)).length() < 1e-3);

        drag.pointer_up(&mut world, &chain);
        assert_eq!(world.body(chain.card()).unwrap().body_type(), BodyMode::Dynamic);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn cancel_releases_like_pointer_up() {
        let (mut world, chain) = scene();
        let mut drag = DragController::new(CARD);
        drag.pointer_down(&world, &chain, ray_to(Vec3::new(0.0, 4.0, 0.0)), Vec3::NEG_Z);
        drag.apply(&mut world, &chain);
        drag.pointer_cancel(&mut world, &chain);
        assert_eq!(world.body(chain.card()).unwrap().body_type(), BodyMode::Dynamic);
        assert_eq!(drag.cursor_hint(), CursorHint::Default);
    }

    #[test]
    fn missing_card_never_drags() {
        let (world, chain) = scene();
        let mut nodes: Vec<ChainNode> = chain.nodes().to_vec();
        nodes[4].handle = BodyHandle(77);
        let broken = Chain::new(nodes).unwrap();
        let mut drag = DragController::new(CARD);
        assert!(!drag.pointer_down(&world, &broken, ray_to(Vec3::new(0.0, 4.0, 0.0)), Vec3::NEG_Z));
    }
}
