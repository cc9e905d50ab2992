//! Snapshot system: reads the context and builds a complete FrameSnapshot.
//!
//! Read-only; it never modifies the world.

use hecs::World;

use railshot_core::components::{Enemy, Projectile, RenderHandle, SpawnSerial};
use railshot_core::events::SimEvent;
use railshot_core::state::{EnemyView, FrameSnapshot, ProjectileView};

use crate::context::SimContext;

/// Build a complete FrameSnapshot from the current context.
pub fn build_snapshot(ctx: &SimContext, events: Vec<SimEvent>) -> FrameSnapshot {
    FrameSnapshot {
        time: ctx.time,
        rig_state: ctx.rig.state(),
        path_t: ctx.rig.parameter(),
        camera: ctx.rig.camera_pose(),
        tracked_position: ctx.rig.tracked_position(),
        enemies: build_enemies(&ctx.world),
        projectiles: build_projectiles(&ctx.world),
        events,
        score: ctx.score,
    }
}

/// Enemies sorted by registration order.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &SpawnSerial, &RenderHandle)>()
        .iter()
        .map(|(_, (enemy, serial, handle))| EnemyView {
            serial: serial.0,
            handle: *handle,
            position: enemy.position,
            phase: enemy.phase,
        })
        .collect();
    enemies.sort_by_key(|e| e.serial);
    enemies
}

/// Projectiles sorted by firing order.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &SpawnSerial, &RenderHandle)>()
        .iter()
        .map(|(_, (projectile, serial, handle))| ProjectileView {
            serial: serial.0,
            handle: *handle,
            position: projectile.position,
            velocity: projectile.velocity,
        })
        .collect();
    projectiles.sort_by_key(|p| p.serial);
    projectiles
}
