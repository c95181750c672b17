use glam::{Vec2, Vec3};

use crate::domain::camera::Ray;

use super::BadgeCore;

/// Pointer ray and camera forward, both in the badge group's local frame.
fn group_ray(core: &BadgeCore, ndc: Vec2) -> (Ray, Vec3) {
    let to_group = core.group_rotation().inverse();
    let ray = core.camera.ray(ndc).rotated(to_group);
    (ray, to_group * core.camera.forward())
}

pub(super) fn pointer_move(core: &mut BadgeCore, ndc: Vec2) {
    if !ndc.is_finite() {
        return;
    }
    core.pointer_ndc = ndc;
    let (ray, _) = group_ray(core, ndc);
    core.drag.pointer_move(&core.world, &core.chain, ray);
}

pub(super) fn pointer_down(core: &mut BadgeCore, ndc: Vec2) -> bool {
    if !ndc.is_finite() {
        return false;
    }
    core.pointer_ndc = ndc;
    let (ray, view_dir) = group_ray(core, ndc);
    core.drag.pointer_down(&core.world, &core.chain, ray, view_dir)
}

pub(super) fn pointer_up(core: &mut BadgeCore) {
    core.drag.pointer_up(&mut core.world, &core.chain);
}

pub(super) fn pointer_cancel(core: &mut BadgeCore) {
    core.drag.pointer_cancel(&mut core.world, &core.chain);
}
