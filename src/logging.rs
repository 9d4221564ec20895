//! Logging setup.
//!
//! Writes logs to `~/.breathe/logs/breathe.log` so the terminal UI is not
//! disturbed. Set `BREATHE_LOG` to a filter such as `debug` or
//! `breathe=trace` for more output.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Paths;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "BREATHE_LOG";

/// Filter used when `BREATHE_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the log filter from the environment.
#[must_use]
pub fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize logging.
///
/// Falls back to stderr if the log file cannot be opened. Calling this
/// more than once is harmless.
pub fn init(paths: &Paths) {
    let filter = filter_from_env();

    let file = paths.ensure_dirs().ok().and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths.log_file())
            .ok()
    });

    let result = match file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}
