//! Simulation engine for RAILSHOT.
//!
//! Owns the hecs ECS world and the camera rig, runs systems once per frame
//! cycle, spawns enemies on an independent timer, and produces
//! `FrameSnapshot`s for the renderer.

pub mod context;
pub mod engine;
pub mod systems;
pub mod timing;
pub mod world_setup;

pub use context::SimContext;
pub use engine::FrameScheduler;
pub use railshot_core as core;

#[cfg(test)]
mod tests;
