//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// An authored 3D coordinate used to shape the path.
pub type ControlPoint = DVec3;

/// Camera transform: where the eye sits and the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: DVec3,
    pub look_target: DVec3,
}

impl CameraPose {
    pub fn new(position: DVec3, look_target: DVec3) -> Self {
        Self {
            position,
            look_target,
        }
    }

    /// Camera at `position` looking down -Z, the default viewing direction.
    pub fn looking_down_neg_z(position: DVec3) -> Self {
        Self::new(position, position + DVec3::NEG_Z)
    }

    /// Unit facing direction. Falls back to -Z when the look target coincides
    /// with the position.
    pub fn forward(&self) -> DVec3 {
        (self.look_target - self.position)
            .try_normalize()
            .unwrap_or(DVec3::NEG_Z)
    }

    /// Unit right vector, with +Y as world up.
    pub fn right(&self) -> DVec3 {
        let forward = self.forward();
        forward
            .cross(DVec3::Y)
            .try_normalize()
            // Looking straight up or down: any horizontal axis will do.
            .unwrap_or(DVec3::X)
    }

    /// Unit up vector, orthogonal to forward and right.
    pub fn up(&self) -> DVec3 {
        self.right().cross(self.forward())
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::looking_down_neg_z(DVec3::ZERO)
    }
}

/// World-space ray produced by the scene collaborator from screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frame cycles that actually ran.
    pub frame: u64,
    /// Elapsed simulated seconds (sum of frame deltas).
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.frame += 1;
        self.elapsed_secs += dt;
    }
}
