//! Control surface between the console and the game loop thread.
//!
//! Mirrors a request/response command API: start the loop once, forward
//! player commands, poll the latest snapshot, and stop.

use std::io;

use thiserror::Error;
use tracing::info;

use railshot_core::commands::PlayerCommand;
use railshot_core::config::RailConfig;
use railshot_core::state::FrameSnapshot;
use railshot_sim::FrameScheduler;

use crate::game_loop::{self, LoopTiming};
use crate::stage::HeadlessStage;
use crate::state::{AppState, GameLoopCommand};

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has stopped")]
    LoopStopped,
    #[error("failed to spawn game loop: {0}")]
    Spawn(#[from] io::Error),
    #[error("shared state lock poisoned")]
    Poisoned,
}

/// Start the game loop thread. Fails if it is already running.
pub fn start_simulation(
    state: &AppState,
    scheduler: FrameScheduler,
    stage: HeadlessStage,
    config: &RailConfig,
) -> Result<(), ControlError> {
    let mut handle_lock = state.loop_handle.lock().map_err(|_| ControlError::Poisoned)?;
    if handle_lock.is_some() {
        return Err(ControlError::AlreadyRunning);
    }

    let timing = LoopTiming {
        refresh: config.display.refresh_interval(),
        spawn_interval: config.spawner.interval(),
    };
    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(scheduler, stage, state.latest_snapshot.clone(), timing)?;

    let mut tx_lock = state.command_tx.lock().map_err(|_| ControlError::Poisoned)?;
    *tx_lock = Some(cmd_tx);
    *handle_lock = Some(handle);
    info!("simulation started");
    Ok(())
}

/// Forward a player command to the game loop.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), ControlError> {
    let tx_lock = state.command_tx.lock().map_err(|_| ControlError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::Player(command))
            .map_err(|_| ControlError::LoopStopped),
        None => Err(ControlError::NotStarted),
    }
}

/// Latest snapshot, if any frame has run yet.
pub fn get_snapshot(state: &AppState) -> Result<Option<FrameSnapshot>, ControlError> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|_| ControlError::Poisoned)?;
    Ok(lock.clone())
}

/// Ask the game loop to shut down and wait for it to finish.
pub fn stop_simulation(state: &AppState) -> Result<(), ControlError> {
    let tx = state
        .command_tx
        .lock()
        .map_err(|_| ControlError::Poisoned)?
        .take();
    let handle = state
        .loop_handle
        .lock()
        .map_err(|_| ControlError::Poisoned)?
        .take();

    let (Some(tx), Some(handle)) = (tx, handle) else {
        return Err(ControlError::NotStarted);
    };
    // A disconnected channel also stops the loop.
    let _ = tx.send(GameLoopCommand::Shutdown);
    handle.join().map_err(|_| ControlError::LoopStopped)?;
    info!("simulation stopped");
    Ok(())
}
