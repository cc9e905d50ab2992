//! Entity spawn factories and ordered views over the live sets.
//!
//! Every entity gets a `SpawnSerial` so hit-testing and snapshots can walk
//! the live sets in registration order, independent of hecs storage order.

use glam::DVec3;
use hecs::{Entity, World};

use railshot_core::components::{Enemy, Projectile, RenderHandle, SpawnSerial};
use railshot_core::stage::{Renderable, SceneGraph};

use crate::context::SimContext;

/// Attach an enemy to the scene and register it in the live set.
pub fn spawn_enemy(
    ctx: &mut SimContext,
    scene: &mut impl SceneGraph,
    position: DVec3,
    phase: f64,
) -> (SpawnSerial, Entity) {
    let serial = next_serial(ctx);
    let handle = scene.add(Renderable::Enemy { position });
    let entity = ctx
        .world
        .spawn((Enemy { position, phase }, serial, handle));
    (serial, entity)
}

/// Attach a projectile to the scene and register it in the live set.
pub fn spawn_projectile(
    ctx: &mut SimContext,
    scene: &mut impl SceneGraph,
    position: DVec3,
    velocity: DVec3,
) -> (SpawnSerial, Entity) {
    let serial = next_serial(ctx);
    let handle = scene.add(Renderable::Projectile { position });
    let entity = ctx
        .world
        .spawn((Projectile { position, velocity }, serial, handle));
    (serial, entity)
}

fn next_serial(ctx: &mut SimContext) -> SpawnSerial {
    let serial = SpawnSerial(ctx.next_serial);
    ctx.next_serial += 1;
    serial
}

/// Live enemies and their positions, in registration order.
pub fn ordered_enemies(world: &World) -> Vec<(SpawnSerial, Entity, DVec3)> {
    let mut enemies: Vec<(SpawnSerial, Entity, DVec3)> = world
        .query::<(&Enemy, &SpawnSerial)>()
        .iter()
        .map(|(entity, (enemy, serial))| (*serial, entity, enemy.position))
        .collect();
    enemies.sort_unstable_by_key(|(serial, _, _)| *serial);
    enemies
}

/// Live projectiles in firing order.
pub fn live_projectiles(world: &World) -> Vec<(SpawnSerial, Entity)> {
    let mut projectiles: Vec<(SpawnSerial, Entity)> = world
        .query::<(&Projectile, &SpawnSerial)>()
        .iter()
        .map(|(entity, (_, serial))| (*serial, entity))
        .collect();
    projectiles.sort_unstable_by_key(|(serial, _)| *serial);
    projectiles
}

/// Render handle attached to an entity, if it is still alive.
pub fn render_handle(world: &World, entity: Entity) -> Option<RenderHandle> {
    world.get::<&RenderHandle>(entity).ok().map(|h| *h)
}
