//! Simulation constants and tuning defaults.
//!
//! Every value here is the default for a field of [`crate::config::RailConfig`].

// --- Path ---

/// Samples in the cumulative arc-length table.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Segments in the path preview line handed to the scene.
pub const PATH_PREVIEW_SEGMENTS: usize = 500;

/// Authored path, in hundreds of world units. The first and last points coincide.
pub const AUTHORED_PATH: [[f64; 3]; 37] = [
    [-9.88, 3.40, 13.87],
    [-7.48, 3.20, 12.29],
    [-4.72, 2.6, 10.44],
    [-1.9, 1.46, 8.98],
    [-0.45, 1.42, 8.2],
    [1.29, 0.6, 6.54],
    [3.71, 0.3, 3.38],
    [6.0, -0.2, 2.0],
    [10.3, 0.6, 2.8],
    [11.7, 1.0, 3.6],
    [12.4, 1.2, 4.6],
    [12.7, 1.5, 7.2],
    [12.5, 1.6, 8.9],
    [12.5, 2.0, 10.0],
    [12.4, 1.9, 13.9],
    [12.0, 1.7, 15.4],
    [11.2, 1.8, 16.9],
    [8.4, 1.9, 18.50],
    [7.4, 2.0, 20.0],
    [7.0, 2.2, 22.4],
    [5.2, 2.3, 23.8],
    [3.2, 2.5, 25.0],
    [0.9, 3.4, 28.0],
    [-3.1, 3.3, 31.4],
    [-7.9, 4.7, 33.9],
    [-11.4, 3.3, 36.1],
    [-14.7, 3.4, 36.6],
    [-16.6, 3.5, 35.8],
    [-18.37, 3.7, 34.4],
    [-20.2, 3.7, 31.3],
    [-20.8, 3.4, 27.7],
    [-20.2, 3.2, 23.4],
    [-19.5, 3.2, 21.6],
    [-18.5, 3.25, 20.4],
    [-16.9, 3.5, 18.6],
    [-14.5, 4.0, 16.7],
    [-9.88, 3.40, 13.87],
];

/// Scale applied to [`AUTHORED_PATH`].
pub const AUTHORED_PATH_SCALE: f64 = 100.0;

// --- Camera rig ---

/// Path parameter advanced per second of elapsed time (one lap in 50 s).
pub const SPEED_FACTOR: f64 = 0.02;

/// Camera position before the rig first runs.
pub const INITIAL_CAMERA_POSITION: [f64; 3] = [0.0, 180.0, 250.0];

// --- Spawner ---

/// Maximum number of live enemies.
pub const ENEMY_CAPACITY: usize = 6;

/// Spawn timer period in milliseconds.
pub const SPAWN_INTERVAL_MS: u64 = 1000;

/// Distance in front of the camera at which enemies appear.
pub const SPAWN_FORWARD_DISTANCE: f64 = 100.0;

/// Half-width of the lateral jitter applied when a hit enemy is relocated.
pub const RELOCATE_JITTER: f64 = 10.0;

/// Vertical bobbing amplitude of enemies.
pub const BOB_AMPLITUDE: f64 = 0.3;

/// Bobbing phase rate (radians per second).
pub const BOB_RATE: f64 = 3.0;

// --- Projectiles ---

/// Projectile speed (units per second).
pub const PROJECTILE_SPEED: f64 = 10.0;

/// Distance under which a projectile strikes an enemy.
pub const HIT_RADIUS: f64 = 55.0;

/// Depth past which projectiles are retired (along -Z from the world origin).
pub const FAR_BOUNDARY: f64 = 500.0;

// --- Presentation ---

/// Soundtrack started by the `start` transport command.
pub const AUDIO_TRACK: &str = "audios/darrel.mp3";

/// Display refresh rate driving frame cycles (Hz).
pub const REFRESH_HZ: u32 = 60;

/// Highest display refresh rate the frame pacing accepts.
pub const MAX_REFRESH_HZ: u32 = 1000;

/// Vertical field of view of the perspective camera (degrees).
pub const FOV_Y_DEGREES: f64 = 75.0;

/// Default viewport size in pixels.
pub const VIEWPORT_WIDTH: f64 = 1280.0;
pub const VIEWPORT_HEIGHT: f64 = 720.0;
