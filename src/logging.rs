// src/logging.rs
// =============================================================================
// Logging setup: every event goes to the console (stderr) and to a log file.
//
// The subscriber is built once in main.rs and installed before the crawl
// starts. Library code only emits `tracing` events (info!, warn!, error!) and
// never configures anything itself, so tests can install their own scoped
// subscriber or none at all.
//
// The level defaults to "info" and can be changed with RUST_LOG, e.g.
//   RUST_LOG=debug pad-archiver
// =============================================================================

use anyhow::Result;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

// Installs the console + file subscriber
//
// If the log file can't be opened we still log to the console and say so.
// Fails only if a global subscriber was already installed.
pub fn init_logging(log_file: &Path) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file, open_error) = match open_log_file(log_file) {
        Ok(file) => (Some(file), None),
        Err(e) => (None, Some(e)),
    };

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    // Option<Layer> is a no-op layer when None
    let file_layer = file.map(|file| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    match open_error {
        None => tracing::debug!("logging to '{}'", log_file.display()),
        Some(e) => tracing::warn!(
            "could not open log file '{}', logging to the console only: {}",
            log_file.display(),
            e
        ),
    }

    Ok(())
}

// Appends to an existing log so several runs end up in one file
fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
