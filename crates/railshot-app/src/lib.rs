//! RAILSHOT console application.
//!
//! Wires the simulation crates to a headless stage, drives the frame
//! scheduler from a real-time loop thread, and accepts transport and fire
//! commands from a line-oriented console.

pub mod console;
pub mod control;
pub mod game_loop;
pub mod stage;
pub mod state;

pub use railshot_core as core;
