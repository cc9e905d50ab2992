//! Line-oriented console commands.
//!
//! ```text
//! start | pause | restart
//! fire <screen_x> <screen_y>
//! status
//! quit
//! ```

use std::num::ParseFloatError;

use thiserror::Error;

use railshot_core::commands::PlayerCommand;

/// A parsed console line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleCommand {
    Player(PlayerCommand),
    /// Print the latest snapshot.
    Status,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandParseError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`fire` needs screen coordinates: fire <x> <y>")]
    MissingCoordinates,
    #[error("unexpected argument `{0}`")]
    TrailingArgument(String),
    #[error("invalid coordinate `{value}`: {source}")]
    BadCoordinate {
        value: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("coordinate `{0}` is not finite")]
    NonFiniteCoordinate(String),
}

/// Parse one console line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, CommandParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "start" => ConsoleCommand::Player(PlayerCommand::Start),
        "pause" => ConsoleCommand::Player(PlayerCommand::Pause),
        "restart" => ConsoleCommand::Player(PlayerCommand::Restart),
        "status" => ConsoleCommand::Status,
        "quit" | "exit" => ConsoleCommand::Quit,
        "fire" => {
            let screen_x = coordinate(words.next())?;
            let screen_y = coordinate(words.next())?;
            ConsoleCommand::Player(PlayerCommand::Fire { screen_x, screen_y })
        }
        other => return Err(CommandParseError::Unknown(other.to_string())),
    };

    match words.next() {
        Some(extra) => Err(CommandParseError::TrailingArgument(extra.to_string())),
        None => Ok(Some(command)),
    }
}

fn coordinate(word: Option<&str>) -> Result<f64, CommandParseError> {
    let word = word.ok_or(CommandParseError::MissingCoordinates)?;
    let value: f64 = word
        .parse()
        .map_err(|source| CommandParseError::BadCoordinate {
            value: word.to_string(),
            source,
        })?;
    if !value.is_finite() {
        return Err(CommandParseError::NonFiniteCoordinate(word.to_string()));
    }
    Ok(value)
}
