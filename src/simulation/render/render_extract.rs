use glam::Mat4;

use crate::physics::PhysicsWorld;

use super::{BadgeCore, RibbonLayoutData};

/// Pointers into the live ribbon buffers. All zero-length (dangling but
/// aligned pointers) before the first mesh exists.
pub(super) fn ribbon_layout_data(core: &BadgeCore) -> RibbonLayoutData {
    let (positions, normals, uvs, indices): (&[f32], &[f32], &[f32], &[u32]) = match core.geometry.current() {
        Some(mesh) => (
            mesh.positions.as_slice(),
            mesh.normals.as_slice(),
            mesh.uvs.as_slice(),
            mesh.indices.as_slice(),
        ),
        None => (&[], &[], &[], &[]),
    };
    RibbonLayoutData {
        positions_ptr: positions.as_ptr(),
        positions_len: positions.len(),
        normals_ptr: normals.as_ptr(),
        normals_len: normals.len(),
        uvs_ptr: uvs.as_ptr(),
        uvs_len: uvs.len(),
        indices_ptr: indices.as_ptr(),
        indices_len: indices.len(),
        generation: core.geometry.generation(),
    }
}

/// Interpolated card matrix and debug node positions for this frame.
pub(super) fn refresh(core: &mut BadgeCore) {
    let alpha = core.clock.alpha();

    if let Some((translation, rotation)) = core.world.interpolated_pose(core.chain.card(), alpha) {
        let group = Mat4::from_quat(core.group_rotation());
        core.card_matrix = (group * Mat4::from_rotation_translation(rotation, translation)).to_cols_array();
    }

    core.debug_nodes.clear();
    for handle in core.chain.handles() {
        if let Some((translation, _)) = core.world.interpolated_pose(handle, alpha) {
            core.debug_nodes.extend_from_slice(&translation.to_array());
        }
    }
}
