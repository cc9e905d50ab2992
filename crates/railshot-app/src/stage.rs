//! Headless stage: a scene graph and audio deck that only keep books and log.
//!
//! Stands in for a renderer and sound system. Ray casting uses a symmetric
//! perspective projection built from the display configuration, so console
//! fire commands land where a real viewport click would.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use railshot_core::components::RenderHandle;
use railshot_core::config::DisplayConfig;
use railshot_core::enums::RenderKind;
use railshot_core::stage::{AudioDeck, Renderable, SceneGraph};
use railshot_core::types::{CameraPose, Ray};

#[derive(Debug)]
pub struct HeadlessStage {
    display: DisplayConfig,
    next_handle: u64,
    live: HashMap<RenderHandle, RenderKind>,
    track: Option<String>,
    playing: bool,
}

impl HeadlessStage {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            display,
            next_handle: 0,
            live: HashMap::new(),
            track: None,
            playing: false,
        }
    }

    /// Number of scene objects currently attached.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_of_kind(&self, kind: RenderKind) -> usize {
        self.live.values().filter(|k| **k == kind).count()
    }

    pub fn track(&self) -> Option<&str> {
        self.track.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl SceneGraph for HeadlessStage {
    fn add(&mut self, renderable: Renderable) -> RenderHandle {
        self.next_handle += 1;
        let handle = RenderHandle(self.next_handle);
        let kind = renderable.kind();
        self.live.insert(handle, kind);
        match renderable {
            Renderable::PathLine { points } => {
                debug!(handle = handle.0, points = points.len(), "path line attached");
            }
            Renderable::TrackedMarker { position }
            | Renderable::Enemy { position }
            | Renderable::Projectile { position } => {
                debug!(handle = handle.0, ?kind, ?position, "object attached");
            }
        }
        handle
    }

    fn remove(&mut self, handle: RenderHandle) {
        match self.live.remove(&handle) {
            Some(kind) => debug!(handle = handle.0, ?kind, "object detached"),
            None => warn!(handle = handle.0, "detach of unknown scene object"),
        }
    }

    fn cast_ray(&self, screen_x: f64, screen_y: f64, camera: &CameraPose) -> Ray {
        let DisplayConfig {
            width,
            height,
            fov_y_degrees,
            ..
        } = self.display;

        // Pixels to normalised device coordinates, +Y up.
        let ndc_x = screen_x / width * 2.0 - 1.0;
        let ndc_y = 1.0 - screen_y / height * 2.0;

        let half_height = (fov_y_degrees.to_radians() * 0.5).tan();
        let half_width = half_height * (width / height);

        let forward = camera.forward();
        let direction = forward
            + camera.right() * (ndc_x * half_width)
            + camera.up() * (ndc_y * half_height);

        Ray::new(camera.position, direction.try_normalize().unwrap_or(forward))
    }
}

impl AudioDeck for HeadlessStage {
    fn load_and_play(&mut self, track: &str) {
        info!(track, "audio playing");
        self.track = Some(track.to_string());
        self.playing = true;
    }

    fn pause(&mut self) {
        info!("audio paused");
        self.playing = false;
    }

    fn restart(&mut self) {
        info!(track = ?self.track, "audio restarted");
        self.playing = true;
    }
}
