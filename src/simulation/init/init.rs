use glam::Vec2;

use crate::background::GlitterBackground;
use crate::chain::{Chain, ChainNode, LanyardLayout, LANYARD_NODES};
use crate::config::BadgeConfig;
use crate::curve::CurveSampler;
use crate::domain::camera::Camera;
use crate::domain::material::BandMaterial;
use crate::drag::DragController;
use crate::physics::{BodyDesc, BodyMode, ColliderShape, LanyardWorld, PhysicsWorld, WorldParams};
use crate::ribbon::{GeometrySlot, RibbonMeshBuilder, RibbonParams};
use crate::stabilizer::OrientationStabilizer;

use super::perf_stats::PerfStats;
use super::{render_extract, step, BadgeCore, FixedClock, FIXED_DT, MAX_TICKS_PER_FRAME, NOISE_SEED};

/// Create the lanyard bodies and joints in `world`.
///
/// Anchor is fixed, the three joints and the card are dynamic. Consecutive
/// bodies up to the last joint are tied with rope joints; the last joint holds
/// the card through a spherical joint at the card's clip.
pub fn spawn_lanyard<W: PhysicsWorld>(world: &mut W, layout: &LanyardLayout) -> Chain {
    let card_index = LANYARD_NODES - 1;
    let nodes: [ChainNode; LANYARD_NODES] = std::array::from_fn(|i| {
        let at = layout.spawn_position(i);
        let mode = if i == 0 { BodyMode::Fixed } else { BodyMode::Dynamic };
        let shape = if i == card_index {
            ColliderShape::Cuboid { half_extents: layout.card_half_extents }
        } else {
            ColliderShape::Ball { radius: layout.joint_radius }
        };
        let desc = BodyDesc::new(mode, at, shape).damping(layout.linear_damping, layout.angular_damping);
        ChainNode::new(world.insert_body(desc), at)
    });

    for pair in nodes[..card_index].windows(2) {
        world.insert_rope_joint(pair[0].handle, pair[1].handle, layout.rope_length);
    }
    world.insert_spherical_joint(
        nodes[card_index - 1].handle,
        nodes[card_index].handle,
        glam::Vec3::ZERO,
        layout.card_anchor,
    );

    Chain::lanyard(nodes)
}

pub(super) fn create_badge_core(config: BadgeConfig) -> BadgeCore {
    let layout = LanyardLayout::default();
    let mut world = LanyardWorld::new(WorldParams::default());
    let chain = spawn_lanyard(&mut world, &layout);

    let material = BandMaterial::from_props(&config.band_material_props).unwrap_or_else(|err| {
        log::warn!("{err}; using default band material");
        BandMaterial::default()
    });
    let mut background = GlitterBackground::new(config.glitter.clone(), NOISE_SEED);
    background.set_visible(config.show_glitter);

    let mut core = BadgeCore {
        ribbon_params: RibbonParams::from(&config.band_geometry_props),
        drag: DragController::new(Vec2::new(layout.card_half_extents.x, layout.card_half_extents.y)),
        config,
        layout,
        world,
        chain,
        camera: Camera::default(),
        viewport: Vec2::ONE,
        pointer_ndc: Vec2::ZERO,
        stabilizer: OrientationStabilizer::new(),
        orientation: None,
        curve: CurveSampler::new(),
        builder: RibbonMeshBuilder::default(),
        geometry: GeometrySlot::new(),
        material,
        background,
        clock: FixedClock::new(FIXED_DT, MAX_TICKS_PER_FRAME),
        elapsed: 0.0,
        ticks: 0,
        card_matrix: [0.0; 16],
        debug_nodes: Vec::with_capacity(LANYARD_NODES * 3),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    };
    step::refresh_geometry(&mut core);
    render_extract::refresh(&mut core);
    log::info!("lanyard scene ready: {} bodies", core.world.body_count());
    core
}

pub(super) fn reset(core: &mut BadgeCore) {
    let mut world = LanyardWorld::new(*core.world.params());
    core.chain = spawn_lanyard(&mut world, &core.layout);
    core.world = world;
    core.drag = DragController::new(Vec2::new(core.layout.card_half_extents.x, core.layout.card_half_extents.y));
    core.stabilizer = OrientationStabilizer::new();
    core.orientation = None;
    core.clock.reset();
    core.ticks = 0;
    step::refresh_geometry(core);
    render_extract::refresh(core);
    log::debug!("lanyard scene reset");
}
