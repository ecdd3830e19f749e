//! Tracing subscriber setup.
//!
//! Line-mode commands log to stderr. The TUI owns the terminal, so in that mode
//! logs go to `--log-file` or nowhere.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("medinsure=debug,info")
        } else {
            EnvFilter::new("medinsure=warn")
        }
    })
}

pub fn init_logger(verbose: bool, log_file: Option<&Path>, interactive: bool) -> Result<(), AppError> {
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AppError::new(1, format!("Failed to open log file '{}': {e}", path.display())))?;
        tracing_subscriber::registry()
            .with(filter(verbose))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false)
                    .compact(),
            )
            .init();
        return Ok(());
    }

    if interactive {
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
    Ok(())
}
