//! Player commands delivered to the frame scheduler.
//!
//! Commands are queued and processed at the next cycle boundary.

use serde::{Deserialize, Serialize};

use crate::enums::Transport;

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Transport ---
    /// Start (or resume) travel along the path.
    Start,
    /// Stop travel, keeping the current path parameter.
    Pause,
    /// Rewind to the beginning of the path and start.
    Restart,

    // --- Combat ---
    /// Pointer click at screen coordinates (pixels, origin top-left).
    Fire { screen_x: f64, screen_y: f64 },
}

impl From<Transport> for PlayerCommand {
    fn from(transport: Transport) -> Self {
        match transport {
            Transport::Start => PlayerCommand::Start,
            Transport::Pause => PlayerCommand::Pause,
            Transport::Restart => PlayerCommand::Restart,
        }
    }
}
