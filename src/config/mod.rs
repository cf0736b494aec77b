//! Configuration management module
//!
//! Handles loading, saving, and validation of the gift configuration.
//! The file is optional: a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::state::Screen;
use crate::content::{DEFAULT_LOCK_CODE, DEFAULT_NAME};
use crate::{KeepsakeError, Result, APP_NAME, CONFIG_FILE};

pub mod persistence;

/// Serde adapter for durations written as "100ms", "5s", ...
mod human_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}

/// Complete gift configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftConfig {
    pub recipient: RecipientConfig,
    pub lock: LockConfig,
    pub hold: HoldConfig,
    pub shake: ShakeConfig,
    pub scratch: ScratchConfig,
    pub card_match: CardMatchConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipientConfig {
    /// Name used when the personalization step is skipped or left blank
    pub default_name: String,
}

impl Default for RecipientConfig {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    pub code: String,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            code: DEFAULT_LOCK_CODE.to_string(),
        }
    }
}

/// Hold-to-reveal timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldConfig {
    #[serde(with = "human_duration")]
    pub tick_interval: Duration,
    /// Percent added per tick while held
    pub step_percent: f64,
    /// Silence after the last key repeat that counts as a release
    #[serde(with = "human_duration")]
    pub release_grace: Duration,
    /// Set at startup when the terminal sends key-up events; the grace
    /// timeout is then not used
    #[serde(skip)]
    pub release_events: bool,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            step_percent: 2.0,
            release_grace: Duration::from_millis(600),
            release_events: false,
        }
    }
}

impl HoldConfig {
    /// Time a continuous hold takes to reveal
    pub fn full_hold(&self) -> Duration {
        let ticks = (100.0 / self.step_percent).ceil() as u32;
        self.tick_interval * ticks
    }
}

/// Shake detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// Acceleration magnitude (in g) that counts as a shake
    pub threshold_g: f64,
    /// Spikes closer together than this are one shake
    #[serde(with = "human_duration")]
    pub min_interval: Duration,
    pub required_shakes: u32,
    #[serde(with = "human_duration")]
    pub sample_interval: Duration,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            threshold_g: 1.5,
            min_interval: Duration::from_millis(500),
            required_shakes: 3,
            sample_interval: Duration::from_millis(100),
        }
    }
}

/// Scratch card geometry, in terminal cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchConfig {
    pub width: u16,
    pub height: u16,
    pub brush_width: u16,
    pub brush_height: u16,
    /// Coverage that must be exceeded to reveal
    pub reveal_percent: f64,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 10,
            brush_width: 2,
            brush_height: 1,
            reveal_percent: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardMatchConfig {
    /// How long a face-up pair stays visible before it is checked
    #[serde(with = "human_duration")]
    pub reveal_delay: Duration,
}

impl Default for CardMatchConfig {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_secs(1),
        }
    }
}

/// Where sound cues go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SoundOutput {
    /// Terminal bell on cues that matter
    #[default]
    Bell,
    Silent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event poll timeout for the main loop
    #[serde(with = "human_duration")]
    pub tick_rate: Duration,
    pub sound: SoundOutput,
    /// Default log filter, overridden by RUST_LOG
    pub log_level: String,
    /// Path of the first screen, e.g. "/crossword"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<String>,
    /// Seed for shuffles and fillers; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(50),
            sound: SoundOutput::Bell,
            log_level: "info".to_string(),
            start_at: None,
            seed: None,
        }
    }
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

impl GiftConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.recipient.default_name.trim().is_empty() {
            return Err(KeepsakeError::Config("Default name must not be empty".to_string()));
        }

        let code = &self.lock.code;
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(KeepsakeError::Config(format!(
                "Lock code must be digits only, got {:?}",
                code
            )));
        }
        const MAX_CODE_LEN: usize = 8;
        if code.len() > MAX_CODE_LEN {
            return Err(KeepsakeError::Config(format!(
                "Lock code too long: {} digits (max: {})",
                code.len(),
                MAX_CODE_LEN
            )));
        }

        if self.hold.tick_interval.is_zero() {
            return Err(KeepsakeError::Config("Hold tick interval must be greater than 0".to_string()));
        }
        if !(self.hold.step_percent > 0.0 && self.hold.step_percent <= 100.0) {
            return Err(KeepsakeError::Config(
                "Hold step must be between 0 (exclusive) and 100 percent".to_string(),
            ));
        }

        if self.shake.threshold_g <= 0.0 {
            return Err(KeepsakeError::Config("Shake threshold must be positive".to_string()));
        }
        if self.shake.required_shakes == 0 {
            return Err(KeepsakeError::Config("At least one shake must be required".to_string()));
        }

        let scratch = &self.scratch;
        if scratch.width == 0 || scratch.height == 0 {
            return Err(KeepsakeError::Config("Scratch card must have a size".to_string()));
        }
        if scratch.brush_width == 0
            || scratch.brush_height == 0
            || scratch.brush_width > scratch.width
            || scratch.brush_height > scratch.height
        {
            return Err(KeepsakeError::Config(
                "Scratch brush must be non-empty and fit inside the card".to_string(),
            ));
        }
        if !(scratch.reveal_percent > 0.0 && scratch.reveal_percent < 100.0) {
            return Err(KeepsakeError::Config(
                "Scratch reveal percent must be between 0 and 100".to_string(),
            ));
        }

        const MIN_TICK: Duration = Duration::from_millis(10);
        const MAX_TICK: Duration = Duration::from_secs(1);
        if self.ui.tick_rate < MIN_TICK || self.ui.tick_rate > MAX_TICK {
            return Err(KeepsakeError::Config(format!(
                "Tick rate must be between {}ms and {}ms",
                MIN_TICK.as_millis(),
                MAX_TICK.as_millis()
            )));
        }

        if !LOG_LEVELS.contains(&self.ui.log_level.to_lowercase().as_str()) {
            return Err(KeepsakeError::Config(format!(
                "Unknown log level: {}",
                self.ui.log_level
            )));
        }

        if let Some(path) = &self.ui.start_at {
            if Screen::from_path(path).is_none() {
                return Err(KeepsakeError::Config(format!("Unknown start screen: {}", path)));
            }
        }

        Ok(())
    }

    /// Screen the journey opens on
    pub fn start_screen(&self) -> Screen {
        self.ui
            .start_at
            .as_deref()
            .and_then(Screen::from_path)
            .unwrap_or_default()
    }

    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.recipient.default_name = name.into();
        self
    }

    pub fn with_lock_code(mut self, code: impl Into<String>) -> Self {
        self.lock.code = code.into();
        self
    }

    pub fn with_start_at(mut self, path: impl Into<String>) -> Self {
        self.ui.start_at = Some(path.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ui.seed = Some(seed);
        self
    }

    pub fn with_sound(mut self, sound: SoundOutput) -> Self {
        self.ui.sound = sound;
        self
    }

    /// Load configuration from the standard config file location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            KeepsakeError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            KeepsakeError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                KeepsakeError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| {
            KeepsakeError::Config(format!("Failed to write config file {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Uses $CONFIG_HOME/keepsake/keepsake.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| KeepsakeError::Config("Unable to determine config directory".to_string()))?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = GiftConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lock.code, "0711");
        assert_eq!(config.hold.full_hold(), Duration::from_secs(5));
        assert_eq!(config.start_screen(), Screen::Entry);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GiftConfig = toml::from_str(
            r#"
            [lock]
            code = "1402"

            [hold]
            tick_interval = "50ms"
            "#,
        )
        .unwrap();
        assert_eq!(config.lock.code, "1402");
        assert_eq!(config.hold.tick_interval, Duration::from_millis(50));
        assert_eq!(config.hold.step_percent, 2.0);
        assert_eq!(config.shake.required_shakes, 3);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let config = GiftConfig::new()
            .with_default_name("Prabh")
            .with_start_at("/crossword")
            .with_seed(9);
        config.save_to(&path).unwrap();

        let loaded = GiftConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.start_screen(), Screen::Crossword);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded = GiftConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, GiftConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(GiftConfig::new().with_lock_code("07a1").validate().is_err());
        assert!(GiftConfig::new().with_lock_code("").validate().is_err());
        assert!(GiftConfig::new().with_start_at("/nowhere").validate().is_err());
        assert!(GiftConfig::new().with_default_name("  ").validate().is_err());

        let mut config = GiftConfig::new();
        config.scratch.reveal_percent = 100.0;
        assert!(config.validate().is_err());

        let mut config = GiftConfig::new();
        config.hold.step_percent = 0.0;
        assert!(config.validate().is_err());

        let mut config = GiftConfig::new();
        config.ui.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_duration_is_parse_error() {
        let parsed: std::result::Result<GiftConfig, _> = toml::from_str(
            r#"
            [hold]
            tick_interval = "soon"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_config_file_path() {
        let path = GiftConfig::config_file_path().unwrap();
        assert!(path.to_string_lossy().contains("keepsake"));
        assert!(path.to_string_lossy().ends_with("keepsake.toml"));
    }
}
