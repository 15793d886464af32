//! Replay tool error types.

use omnilog_core::error::OmniLogError;
use thiserror::Error;

/// Startup and runtime errors for the replay tool.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The script file could not be read, or output could not be written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The script is not valid YAML for the step schema.
    #[error("invalid script: {0}")]
    Script(#[from] serde_yaml::Error),

    /// A record could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The engine could not be built.
    #[error("logger error: {0}")]
    Logger(#[from] OmniLogError),

    /// The output writer task panicked or was cancelled.
    #[error("writer task failed: {0}")]
    Writer(#[from] tokio::task::JoinError),
}
