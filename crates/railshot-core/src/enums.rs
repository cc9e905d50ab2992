//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Camera rig run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RigState {
    /// Not advancing. Initial state, and the state after `pause`.
    #[default]
    Idle,
    /// Advancing the path parameter every frame.
    Running,
}

/// Transport controls exposed to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transport {
    Start,
    Pause,
    Restart,
}

/// Kind of scene object the engine asks the scene to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderKind {
    PathLine,
    TrackedMarker,
    Enemy,
    Projectile,
}
