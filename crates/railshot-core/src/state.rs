//! Frame snapshot: the complete visible state handed to the renderer each cycle.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::components::RenderHandle;
use crate::enums::RigState;
use crate::events::SimEvent;
use crate::types::{CameraPose, SimTime};

/// Complete visible state after one frame cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub rig_state: RigState,
    /// Normalised path parameter in [0, 1).
    pub path_t: f64,
    pub camera: CameraPose,
    pub tracked_position: DVec3,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

/// A live enemy, in registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub serial: u64,
    pub handle: RenderHandle,
    pub position: DVec3,
    pub phase: f64,
}

/// A live projectile, in firing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub serial: u64,
    pub handle: RenderHandle,
    pub position: DVec3,
    pub velocity: DVec3,
}

/// Running score for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub hits: u32,
    pub shots_fired: u32,
}
