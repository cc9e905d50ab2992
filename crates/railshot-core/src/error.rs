//! Error types shared across crates.

use thiserror::Error;

/// Path construction failure. Fatal to setup; the rig cannot start without a curve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("a path needs at least 2 control points, got {supplied}")]
    TooFewControlPoints { supplied: usize },

    #[error("control point {index} is not finite")]
    NonFiniteControlPoint { index: usize },
}

/// Configuration loading or validation failure.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Anything that can stop the scheduler from being built.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("path error: {0}")]
    Path(#[from] PathError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
