//! Log setup.
//!
//! The terminal belongs to the UI, so logs only ever go to a file. Without a
//! log file nothing is installed and the `tracing` macros are no-ops.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a plain-text file logger. `RUST_LOG` overrides `level`.
///
/// Calling it again after a subscriber is installed has no effect.
pub fn init(log_file: &Path, level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init();

    tracing::info!("logging to {}", log_file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xpathquill.log");
        init(&path, "debug").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_init_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("x.log");
        assert!(init(&path, "info").is_err());
    }
}
