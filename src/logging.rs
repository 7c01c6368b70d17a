//! Tracing setup.
//!
//! The terminal belongs to the UI, so log output goes to a file instead of
//! stdout. `RUST_LOG` selects the level, `info` by default.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber writing to `path` (appending).
///
/// # Errors
///
/// Returns [`StorefrontError::Io`](crate::StorefrontError::Io) if the log
/// file cannot be opened.
pub fn init(path: &Path) -> crate::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            crate::StorefrontError::Io(format!("failed to open log file {}: {e}", path.display()))
        })?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();

    tracing::info!(log_file = %path.display(), "logging initialized");
    Ok(())
}
