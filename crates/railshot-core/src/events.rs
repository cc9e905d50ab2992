//! Events emitted by the simulation between two snapshots.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::Transport;

/// Gameplay events, drained into the next frame snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A transport command changed the rig state.
    TransportChanged { transport: Transport },
    /// The spawner materialised a new enemy.
    EnemySpawned { serial: u64, position: DVec3 },
    /// A projectile struck an enemy, which was relocated.
    EnemyHit {
        enemy_serial: u64,
        projectile_serial: u64,
        relocated_to: DVec3,
    },
    /// A projectile left the muzzle.
    ProjectileFired { serial: u64, origin: DVec3 },
    /// A projectile crossed the far boundary and was retired.
    ProjectileExpired { serial: u64 },
}
