//! Entity retirement: despawn and detach from the scene, exactly once.

use hecs::{Entity, World};
use tracing::debug;

use railshot_core::stage::SceneGraph;

use crate::world_setup;

/// Despawn `entity` and remove its scene object.
///
/// Returns false (and touches nothing) if the entity was already gone, so a
/// handle is never removed twice.
pub fn retire(world: &mut World, entity: Entity, scene: &mut impl SceneGraph) -> bool {
    let handle = world_setup::render_handle(world, entity);
    if world.despawn(entity).is_err() {
        return false;
    }
    if let Some(handle) = handle {
        scene.remove(handle);
        debug!(handle = handle.0, "scene object detached");
    }
    true
}

/// Retire every entity in `buffer`, leaving it empty.
pub fn retire_all(world: &mut World, buffer: &mut Vec<Entity>, scene: &mut impl SceneGraph) {
    for entity in buffer.drain(..) {
        retire(world, entity, scene);
    }
}
