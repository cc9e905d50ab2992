//! Projectile firing, integration, hit resolution and retirement.
//!
//! Per tick, in firing order, each projectile is integrated and then tested
//! against the live enemies in registration order. The first enemy within the
//! hit radius is relocated in front of the camera (it is reused, not
//! destroyed) and the projectile is retired. A projectile that hits nothing
//! but has reached the far boundary is retired too. Retirement happens before
//! the tick returns, so the snapshot that follows never shows a dead
//! projectile or a stale enemy position.

use glam::DVec3;
use hecs::Entity;
use tracing::{debug, warn};

use railshot_core::components::{Enemy, Projectile};
use railshot_core::events::SimEvent;
use railshot_core::stage::SceneGraph;

use crate::context::SimContext;
use crate::systems::{cleanup, collision, enemy_spawner};
use crate::world_setup;

/// Launch a projectile from `origin` along `direction` at the configured speed.
///
/// Returns `None` for a zero-length or non-finite direction.
pub fn fire(
    ctx: &mut SimContext,
    origin: DVec3,
    direction: DVec3,
    scene: &mut impl SceneGraph,
) -> Option<Entity> {
    let Some(unit) = direction.try_normalize() else {
        warn!(?direction, "refusing to fire along a degenerate direction");
        return None;
    };
    if !origin.is_finite() {
        warn!(?origin, "refusing to fire from a non-finite origin");
        return None;
    }

    let velocity = unit * ctx.projectiles.speed;
    let (serial, entity) = world_setup::spawn_projectile(ctx, scene, origin, velocity);
    ctx.score.shots_fired += 1;
    ctx.events.push(SimEvent::ProjectileFired {
        serial: serial.0,
        origin,
    });
    debug!(serial = serial.0, ?origin, ?velocity, "projectile fired");
    Some(entity)
}

/// Advance every live projectile by `dt` and resolve hits and expiry.
pub fn run(ctx: &mut SimContext, dt: f64, scene: &mut impl SceneGraph) {
    let hit_radius = ctx.projectiles.hit_radius;
    let far_boundary = ctx.projectiles.far_boundary;

    // Snapshot enemy positions in registration order; relocations update it
    // in place so later projectiles in the same tick see the new positions.
    let enemies = world_setup::ordered_enemies(&ctx.world);
    let mut targets: Vec<DVec3> = enemies.iter().map(|(_, _, position)| *position).collect();

    ctx.despawn_buffer.clear();

    for (serial, entity) in world_setup::live_projectiles(&ctx.world) {
        let position = match ctx.world.get::<&mut Projectile>(entity) {
            Ok(mut projectile) => {
                let step = projectile.velocity * dt;
                projectile.position += step;
                projectile.position
            }
            Err(_) => continue,
        };

        if let Some(index) = collision::first_hit(position, &targets, hit_radius) {
            let (enemy_serial, enemy_entity, _) = enemies[index];
            let pose = ctx.rig.camera_pose();
            let relocated_to =
                enemy_spawner::random_forward_position(&pose, &ctx.spawner, &mut ctx.rng);

            if let Ok(mut enemy) = ctx.world.get::<&mut Enemy>(enemy_entity) {
                enemy.position = relocated_to;
            }
            targets[index] = relocated_to;

            ctx.score.hits += 1;
            ctx.events.push(SimEvent::EnemyHit {
                enemy_serial: enemy_serial.0,
                projectile_serial: serial.0,
                relocated_to,
            });
            debug!(
                enemy = enemy_serial.0,
                projectile = serial.0,
                ?relocated_to,
                "enemy hit"
            );
            ctx.despawn_buffer.push(entity);
        } else if collision::crossed_far_boundary(position, far_boundary) {
            ctx.events.push(SimEvent::ProjectileExpired { serial: serial.0 });
            debug!(serial = serial.0, "projectile expired");
            ctx.despawn_buffer.push(entity);
        }
    }

    cleanup::retire_all(&mut ctx.world, &mut ctx.despawn_buffer, scene);
}
