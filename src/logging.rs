//! Log setup
//!
//! The TUI owns the terminal, so logs go to a file in the data directory.
//! `RUST_LOG` overrides the configured level.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{KeepsakeError, Result, APP_NAME, LOG_FILE};

/// Default location of the log file
pub fn log_file_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| KeepsakeError::Config("Could not find data directory".to_string()))?;
    Ok(data_dir.join(APP_NAME).join(LOG_FILE))
}

/// Filter from `RUST_LOG`, falling back to `level`
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn open_log(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Install the global subscriber writing to `path`
pub fn init_at(path: &Path, level: &str) -> Result<()> {
    let file = open_log(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| KeepsakeError::Config(format!("Failed to install logger: {}", e)))?;
    info!(path = %path.display(), "logging started");
    Ok(())
}

/// Install the global subscriber at the default log path
pub fn init(level: &str) -> Result<()> {
    init_at(&log_file_path()?, level)
}
