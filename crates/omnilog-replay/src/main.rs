//! OmniLog replay tool entry point.

use std::error::Error;

use omnilog_replay::config::Config;
use omnilog_replay::runner;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Diagnostics go to stderr so stdout carries only event lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting OmniLog replay");

    let config = Config::from_env()?;
    runner::replay(&config).await?;

    Ok(())
}
