//! Camera rig state machine.
//!
//! `Idle` is initial. `start` moves to `Running`, `pause` back to `Idle`
//! keeping the path parameter, `restart` rewinds to 0 and starts. Only a
//! running rig advances: `t ← (t + Δ·speed_factor) mod 1`, then the tracked
//! position, camera position and look target are re-derived from the curve.

use glam::DVec3;
use tracing::{info, warn};

use railshot_core::config::RigConfig;
use railshot_core::enums::RigState;
use railshot_core::types::CameraPose;

use crate::spline::SplineCurve;

/// Progress along the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathState {
    /// Normalised path parameter in [0, 1).
    pub t: f64,
    pub active: bool,
}

/// Curve sample produced by one running tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigSample {
    pub t: f64,
    pub position: DVec3,
    pub tangent: DVec3,
}

/// Carries the camera and the tracked object along a curve.
#[derive(Debug, Clone)]
pub struct CameraRig {
    curve: SplineCurve,
    state: RigState,
    t: f64,
    speed_factor: f64,
    offset: DVec3,
    camera: CameraPose,
    tracked: DVec3,
}

impl CameraRig {
    /// Idle rig at t = 0. The camera keeps its initial pose until the first running tick.
    pub fn new(curve: SplineCurve, config: &RigConfig) -> Self {
        let tracked = curve.position_at(0.0);
        Self {
            curve,
            state: RigState::Idle,
            t: 0.0,
            speed_factor: config.speed_factor,
            offset: config.offset,
            camera: CameraPose::looking_down_neg_z(config.initial_camera_position),
            tracked,
        }
    }

    /// Begin advancing. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.state == RigState::Running {
            return false;
        }
        self.state = RigState::Running;
        info!(t = self.t, "rig started");
        true
    }

    /// Stop advancing, keeping t. Returns false if already idle.
    pub fn pause(&mut self) -> bool {
        if self.state == RigState::Idle {
            return false;
        }
        self.state = RigState::Idle;
        info!(t = self.t, "rig paused");
        true
    }

    /// Rewind to the start of the path and run.
    pub fn restart(&mut self) -> bool {
        self.t = 0.0;
        info!("rig rewound");
        self.start();
        true
    }

    /// Advance by `dt` seconds. No-op while idle.
    ///
    /// Negative or non-finite deltas are treated as zero.
    pub fn tick(&mut self, dt: f64) -> Option<RigSample> {
        if self.state == RigState::Idle {
            return None;
        }

        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "ignoring invalid frame delta");
            0.0
        };

        self.t = (self.t + dt * self.speed_factor).rem_euclid(1.0);
        if self.t >= 1.0 {
            self.t = 0.0;
        }

        let position = self.curve.position_at(self.t);
        let tangent = self.curve.tangent_at(self.t);

        self.tracked = position;
        self.camera = CameraPose::new(position + self.offset, position + tangent);

        Some(RigSample {
            t: self.t,
            position,
            tangent,
        })
    }

    pub fn state(&self) -> RigState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RigState::Running
    }

    /// Current path parameter in [0, 1).
    pub fn parameter(&self) -> f64 {
        self.t
    }

    pub fn path_state(&self) -> PathState {
        PathState {
            t: self.t,
            active: self.is_running(),
        }
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera
    }

    pub fn tracked_position(&self) -> DVec3 {
        self.tracked
    }

    pub fn curve(&self) -> &SplineCurve {
        &self.curve
    }
}
