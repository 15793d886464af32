//! Replay configuration read from the environment.

use std::path::PathBuf;

use crate::error::AppError;

/// Path of the YAML script to replay. Required.
pub const SCRIPT_VAR: &str = "OMNILOG_SCRIPT";
/// `stdout` (default) or `tracing`.
pub const SINK_VAR: &str = "OMNILOG_SINK";
/// Optional `u64` seed for reproducible ids.
pub const SEED_VAR: &str = "OMNILOG_SEED";

/// Where replayed records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkKind {
    /// One JSON document per line on stdout.
    #[default]
    Stdout,
    /// `info` events on the tracing log.
    Tracing,
}

/// Replay settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub script_path: PathBuf,
    pub sink: SinkKind,
    pub seed: Option<u64>,
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is missing or malformed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is missing or malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let script_path = lookup(SCRIPT_VAR)
            .map(PathBuf::from)
            .ok_or_else(|| {
                AppError::Config(format!("{SCRIPT_VAR} environment variable must be set"))
            })?;

        let sink = match lookup(SINK_VAR).as_deref() {
            None | Some("stdout") => SinkKind::Stdout,
            Some("tracing") => SinkKind::Tracing,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "{SINK_VAR} must be `stdout` or `tracing`, got {other:?}"
                )));
            }
        };

        let seed = lookup(SEED_VAR)
            .map(|raw| {
                raw.parse::<u64>()
                    .map_err(|e| AppError::Config(format!("{SEED_VAR} must be a valid u64: {e}")))
            })
            .transpose()?;

        Ok(Self {
            script_path,
            sink,
            seed,
        })
    }
}
