//! Application state shared between the console and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use railshot_core::commands::PlayerCommand;
use railshot_core::state::FrameSnapshot;

/// Commands sent from the console to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the frame scheduler.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after each frame.
pub type SharedSnapshot = Arc<Mutex<Option<FrameSnapshot>>>;

/// Shared application state.
///
/// - `command_tx` is `None` until the loop is started
/// - `latest_snapshot` is shared with the game loop thread
/// - `loop_handle` is taken when the loop is stopped
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: SharedSnapshot,
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.loop_handle
            .lock()
            .map(|handle| handle.is_some())
            .unwrap_or(false)
    }
}
