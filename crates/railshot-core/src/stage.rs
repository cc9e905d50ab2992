//! Collaborator contracts: the scene (renderer) and the audio deck.
//!
//! The engine never renders or plays anything itself. It asks the stage to
//! attach and detach scene objects, to turn clicks into rays, and to drive
//! the soundtrack. Calls are fire-and-forget apart from the handle returned
//! by `add`.

use glam::DVec3;

use crate::components::RenderHandle;
use crate::enums::RenderKind;
use crate::types::{CameraPose, Ray};

/// A scene object the engine wants attached.
#[derive(Debug, Clone, PartialEq)]
pub enum Renderable {
    /// Polyline preview of the path.
    PathLine { points: Vec<DVec3> },
    /// Marker riding the path at the tracked position.
    TrackedMarker { position: DVec3 },
    Enemy { position: DVec3 },
    Projectile { position: DVec3 },
}

impl Renderable {
    pub fn kind(&self) -> RenderKind {
        match self {
            Renderable::PathLine { .. } => RenderKind::PathLine,
            Renderable::TrackedMarker { .. } => RenderKind::TrackedMarker,
            Renderable::Enemy { .. } => RenderKind::Enemy,
            Renderable::Projectile { .. } => RenderKind::Projectile,
        }
    }
}

/// Scene/render collaborator.
pub trait SceneGraph {
    /// Attach an object and return its handle.
    fn add(&mut self, renderable: Renderable) -> RenderHandle;
    /// Detach an object. The engine calls this exactly once per handle.
    fn remove(&mut self, handle: RenderHandle);
    /// Convert screen coordinates (pixels) into a world-space ray for `camera`.
    fn cast_ray(&self, screen_x: f64, screen_y: f64, camera: &CameraPose) -> Ray;
}

/// Audio collaborator for the soundtrack.
pub trait AudioDeck {
    fn load_and_play(&mut self, track: &str);
    fn pause(&mut self);
    fn restart(&mut self);
}

/// Everything the scheduler needs from its environment.
pub trait Stage: SceneGraph + AudioDeck {}

impl<T: SceneGraph + AudioDeck> Stage for T {}
