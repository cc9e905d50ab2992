//! Enemy spawning, driven by its own fixed-interval timer.
//!
//! Independent of the frame rate and of the rig's run state. Each call adds
//! at most one enemy, and only while the live set is below capacity.

use std::f64::consts::TAU;

use glam::DVec3;
use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use railshot_core::config::SpawnerConfig;
use railshot_core::events::SimEvent;
use railshot_core::stage::SceneGraph;
use railshot_core::types::CameraPose;

use crate::context::SimContext;
use crate::world_setup;

/// Spawn one enemy in front of the current camera, unless at capacity.
pub fn try_spawn(ctx: &mut SimContext, scene: &mut impl SceneGraph) -> Option<Entity> {
    let live = ctx.enemy_count();
    if live >= ctx.spawner.capacity {
        return None;
    }

    let pose = ctx.rig.camera_pose();
    let position = forward_position(&pose, &ctx.spawner);
    let phase = ctx.rng.gen_range(0.0..TAU);

    let (serial, entity) = world_setup::spawn_enemy(ctx, scene, position, phase);
    debug!(serial = serial.0, live = live + 1, ?position, "enemy spawned");
    ctx.events.push(SimEvent::EnemySpawned {
        serial: serial.0,
        position,
    });
    Some(entity)
}

/// Point at the spawn distance along the camera's facing direction.
pub fn forward_position(pose: &CameraPose, config: &SpawnerConfig) -> DVec3 {
    pose.position + pose.forward() * config.forward_distance
}

/// Spawn point with a random sideways offset, used when a hit enemy is reused.
pub fn random_forward_position(
    pose: &CameraPose,
    config: &SpawnerConfig,
    rng: &mut ChaCha8Rng,
) -> DVec3 {
    let jitter = if config.relocate_jitter > 0.0 {
        rng.gen_range(-config.relocate_jitter..config.relocate_jitter)
    } else {
        0.0
    };
    forward_position(pose, config) + pose.right() * jitter
}
