//! Tracing setup for the filmoteka binary
//!
//! Logs go to an append-only file by default (`app.log`), or to stderr with
//! `--log-stderr`.
//!
//! Environment variables:
//!   RUST_LOG    # Log filter (default: info, or debug with --debug)

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Append to this file, creating it if needed
    File(PathBuf),
    Stderr,
}

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
    pub sink: LogSink,
}

fn env_filter(debug: bool) -> EnvFilter {
    let default = if debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize the global subscriber.
pub fn init(config: &TracingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config.debug))
        .with_target(config.debug);

    match &config.sink {
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!(err))
        }
        LogSink::Stderr => builder
            .compact()
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err)),
    }
}
