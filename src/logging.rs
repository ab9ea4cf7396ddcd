//! Debug logging to a file
//!
//! The terminal belongs to the TUI, so logs only ever go to a file, and only
//! when `--debug` is given.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Parse log level string to tracing Level.
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install a subscriber that appends to `path` at `level`
///
/// `RUST_LOG` directives still apply on top of the level.
pub fn init(path: &Path, level: &str) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(parse_level(level).into());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(filter)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}
