//! Tracing setup.
//!
//! The terminal belongs to the TUI, so log output goes to a file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "aqdash=info";

/// Install a global subscriber appending to `path`.
///
/// Returns an error message when the file can't be opened or a subscriber
/// is already installed; callers continue without logging.
pub fn init_logging(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| format!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!("aqdash {} logging to {}", crate::cli::VERSION, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritable_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory can't be opened for appending
        let result = init_logging(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("aqdash.log");

        // Installing may fail if another test already set a global
        // subscriber; the file must exist either way.
        let _ = init_logging(&path);
        assert!(path.exists());
    }
}
