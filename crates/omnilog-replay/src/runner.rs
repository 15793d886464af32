//! Drives a script through an engine and writes the resulting records.

use std::sync::Arc;

use omnilog_context::{EventLogger, OmniLog, OmniLogBuilder};
use omnilog_core::event::EventRecord;
use omnilog_core::ids::SeededIds;
use omnilog_sinks::{ChannelSink, TracingSink};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, instrument};

use crate::config::{Config, SinkKind};
use crate::error::AppError;
use crate::script::Script;

/// Applies every step of `script` to `logger`, in order. Returns the number
/// of steps applied.
#[instrument(skip_all, fields(steps = script.steps.len()))]
pub fn run<L: EventLogger + ?Sized>(script: &Script, logger: &L) -> usize {
    for step in &script.steps {
        step.apply(logger);
    }
    script.steps.len()
}

/// Writes each received record as one JSON line until the channel closes.
/// Returns the number of records written.
///
/// # Errors
///
/// Returns `AppError::Serialize` or `AppError::Io` if a record cannot be
/// encoded or written.
pub async fn write_json_lines<W>(
    mut rx: UnboundedReceiver<EventRecord>,
    mut out: W,
) -> Result<usize, AppError>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while let Some(record) = rx.recv().await {
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');
        out.write_all(&line).await?;
        written += 1;
    }
    out.flush().await?;
    Ok(written)
}

fn builder(config: &Config) -> OmniLogBuilder {
    match config.seed {
        Some(seed) => OmniLog::builder().ids(SeededIds::new(seed)),
        None => OmniLog::builder(),
    }
}

/// Loads the configured script and replays it into the configured sink.
/// Returns the number of steps applied.
///
/// # Errors
///
/// Returns `AppError` if the script cannot be read or parsed, or if
/// writing records fails.
pub async fn replay(config: &Config) -> Result<usize, AppError> {
    let raw = tokio::fs::read_to_string(&config.script_path).await?;
    let script = Script::from_yaml(&raw)?;
    info!(
        script = %config.script_path.display(),
        steps = script.steps.len(),
        seeded = config.seed.is_some(),
        "replaying script"
    );

    match config.sink {
        SinkKind::Tracing => {
            let logger = builder(config).sink(Arc::new(TracingSink)).build()?;
            Ok(run(&script, &logger))
        }
        SinkKind::Stdout => {
            let (sink, rx) = ChannelSink::new();
            let writer = tokio::spawn(write_json_lines(rx, tokio::io::stdout()));
            let logger = builder(config).sink(Arc::new(sink)).build()?;
            let applied = run(&script, &logger);
            // Dropping the engine drops the last sender and lets the writer finish.
            drop(logger);
            let written = writer.await??;
            info!(applied, written, "replay finished");
            Ok(applied)
        }
    }
}
