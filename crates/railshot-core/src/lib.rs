//! Core types and definitions for the RAILSHOT simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, snapshots, events, configuration, errors and the
//! collaborator traits the engine talks to. It has no dependency on any
//! rendering or audio runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod stage;
pub mod state;
pub mod types;

pub use glam::DVec3;
