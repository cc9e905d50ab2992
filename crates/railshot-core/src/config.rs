//! Runtime configuration.
//!
//! Every section falls back to the defaults in [`crate::constants`], so a
//! config file only needs to name the values it overrides.

use std::path::Path;
use std::time::Duration;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::ControlPoint;

/// Top-level configuration for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RailConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub path: PathConfig,
    pub rig: RigConfig,
    pub spawner: SpawnerConfig,
    pub projectiles: ProjectileConfig,
    pub audio_track: String,
    pub display: DisplayConfig,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            path: PathConfig::default(),
            rig: RigConfig::default(),
            spawner: SpawnerConfig::default(),
            projectiles: ProjectileConfig::default(),
            audio_track: AUDIO_TRACK.to_string(),
            display: DisplayConfig::default(),
        }
    }
}

impl RailConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RailConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject tuning values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rig = &self.rig;
        if !rig.speed_factor.is_finite() || rig.speed_factor < 0.0 {
            return Err(invalid(format!(
                "rig.speed_factor must be finite and >= 0, got {}",
                rig.speed_factor
            )));
        }
        if !rig.offset.is_finite() || !rig.initial_camera_position.is_finite() {
            return Err(invalid("rig vectors must be finite".into()));
        }

        let spawner = &self.spawner;
        if spawner.interval_ms == 0 {
            return Err(invalid("spawner.interval_ms must be > 0".into()));
        }
        for (name, value) in [
            ("spawner.forward_distance", spawner.forward_distance),
            ("spawner.relocate_jitter", spawner.relocate_jitter),
            ("spawner.bob_amplitude", spawner.bob_amplitude),
            ("spawner.bob_rate", spawner.bob_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be finite and >= 0, got {value}")));
            }
        }

        let projectiles = &self.projectiles;
        for (name, value) in [
            ("projectiles.speed", projectiles.speed),
            ("projectiles.hit_radius", projectiles.hit_radius),
            ("projectiles.far_boundary", projectiles.far_boundary),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be finite and > 0, got {value}")));
            }
        }

        if self.path.arc_length_divisions == 0 {
            return Err(invalid("path.arc_length_divisions must be > 0".into()));
        }

        let display = &self.display;
        if display.refresh_hz == 0 || display.refresh_hz > MAX_REFRESH_HZ {
            return Err(invalid(format!(
                "display.refresh_hz must be in 1..={MAX_REFRESH_HZ}, got {}",
                display.refresh_hz
            )));
        }
        if !(display.width.is_finite() && display.width > 0.0)
            || !(display.height.is_finite() && display.height > 0.0)
        {
            return Err(invalid("display size must be finite and positive".into()));
        }
        if !(display.fov_y_degrees > 0.0 && display.fov_y_degrees < 180.0) {
            return Err(invalid(format!(
                "display.fov_y_degrees must be in (0, 180), got {}",
                display.fov_y_degrees
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

/// Path definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub control_points: Vec<ControlPoint>,
    /// Negate Z of every control point before building the curve.
    pub mirror_z: bool,
    pub arc_length_divisions: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            control_points: AUTHORED_PATH
                .iter()
                .map(|p| DVec3::from_array(*p) * AUTHORED_PATH_SCALE)
                .collect(),
            mirror_z: true,
            arc_length_divisions: ARC_LENGTH_DIVISIONS,
        }
    }
}

impl PathConfig {
    /// Control points as they should be fed to the curve builder.
    pub fn effective_points(&self) -> Vec<ControlPoint> {
        if self.mirror_z {
            self.control_points
                .iter()
                .map(|p| DVec3::new(p.x, p.y, -p.z))
                .collect()
        } else {
            self.control_points.clone()
        }
    }
}

/// Camera rig tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub speed_factor: f64,
    /// Camera offset from the tracked position.
    pub offset: DVec3,
    pub initial_camera_position: DVec3,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            speed_factor: SPEED_FACTOR,
            offset: DVec3::ZERO,
            initial_camera_position: DVec3::from_array(INITIAL_CAMERA_POSITION),
        }
    }
}

/// Enemy spawner tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub capacity: usize,
    pub interval_ms: u64,
    pub forward_distance: f64,
    pub relocate_jitter: f64,
    pub bob_amplitude: f64,
    pub bob_rate: f64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            capacity: ENEMY_CAPACITY,
            interval_ms: SPAWN_INTERVAL_MS,
            forward_distance: SPAWN_FORWARD_DISTANCE,
            relocate_jitter: RELOCATE_JITTER,
            bob_amplitude: BOB_AMPLITUDE,
            bob_rate: BOB_RATE,
        }
    }
}

impl SpawnerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Projectile tuning.
///
/// `far_boundary` is measured along -Z from the world origin, not from the
/// camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f64,
    pub hit_radius: f64,
    pub far_boundary: f64,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            hit_radius: HIT_RADIUS,
            far_boundary: FAR_BOUNDARY,
        }
    }
}

/// Display used by the headless stage for ray casting and frame pacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub refresh_hz: u32,
    pub width: f64,
    pub height: f64,
    pub fov_y_degrees: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_hz: REFRESH_HZ,
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            fov_y_degrees: FOV_Y_DEGREES,
        }
    }
}

impl DisplayConfig {
    /// Nominal duration of one display refresh.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.refresh_hz as u64)
    }
}
