//! Keepsake - an interactive gift in the terminal
//!
//! A linear journey of small puzzles and reveals (lock code, crossword,
//! word search, card matching, scratch card, hold and shake reveals, poems)
//! ending in a proposal, wrapped in shared theme and music preferences.

use thiserror::Error;

pub mod app;
pub mod audio;
pub mod config;
pub mod content;
pub mod gesture;
pub mod logging;
pub mod puzzle;
pub mod store;
pub mod theme;

/// Common error type
#[derive(Debug, Error)]
pub enum KeepsakeError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration validation or parsing error
    #[error("Configuration error: {0}")]
    Config(String),
    /// Preference persistence error
    #[error("Preference storage error: {0}")]
    Persistence(String),
    /// TUI rendering or interaction error
    #[error("TUI error: {0}")]
    Tui(String),
    /// Static content is inconsistent (bad puzzle layout, unknown entry)
    #[error("Content error: {0}")]
    Content(String),
    /// Motion sensor could not be started
    #[error("Sensor unavailable: {0}")]
    Sensor(String),
}

impl From<serde_json::Error> for KeepsakeError {
    fn from(err: serde_json::Error) -> Self {
        KeepsakeError::Persistence(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for KeepsakeError {
    fn from(err: toml::de::Error) -> Self {
        KeepsakeError::Config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for KeepsakeError {
    fn from(err: toml::ser::Error) -> Self {
        KeepsakeError::Config(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for keepsake operations
pub type Result<T> = std::result::Result<T, KeepsakeError>;

pub const APP_NAME: &str = "keepsake";
pub const CONFIG_FILE: &str = "keepsake.toml";
pub const PREFERENCES_FILE: &str = "preferences.json";
pub const LOG_FILE: &str = "keepsake.log";
