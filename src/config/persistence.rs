//! Preference persistence module
//!
//! Stores the few flags that survive a restart as a flat JSON object of
//! string keys to string values.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::{KeepsakeError, Result, APP_NAME, PREFERENCES_FILE};

pub const THEME_KEY: &str = "theme_preference";
pub const MUTED_KEY: &str = "music_muted";
pub const TRACK_KEY: &str = "music_track_index";
pub const INTRO_SEEN_KEY: &str = "intro_seen";

pub type PreferenceMap = BTreeMap<String, String>;

/// Key/value preference file manager
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store at the standard location
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: Self::preferences_file_path()?,
        })
    }

    /// Store backed by an explicit file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses $DATA_HOME/keepsake/preferences.json
    pub fn preferences_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| KeepsakeError::Persistence("Unable to determine data directory".to_string()))?;

        Ok(data_dir.join(APP_NAME).join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored preference. A missing file is empty.
    pub fn load(&self) -> Result<PreferenceMap> {
        if !self.path.exists() {
            return Ok(PreferenceMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            KeepsakeError::Persistence(format!(
                "Failed to read preferences file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let map: PreferenceMap = serde_json::from_str(&content).map_err(|e| {
            KeepsakeError::Persistence(format!(
                "Failed to parse preferences file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(map)
    }

    /// Like `load`, but a broken file is logged and treated as empty
    pub fn load_or_default(&self) -> PreferenceMap {
        self.load().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable preferences");
            PreferenceMap::new()
        })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    /// Write one key, keeping the others
    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<()> {
        let mut map = self.load_or_default();
        map.insert(key.to_string(), value.into());
        self.save(&map)
    }

    /// Write several keys in one file write
    pub fn set_many<I, K, V>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = self.load_or_default();
        map.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self.save(&map)
    }

    fn save(&self, map: &PreferenceMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                KeepsakeError::Persistence(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, content).map_err(|e| {
            KeepsakeError::Persistence(format!(
                "Failed to write preferences file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, PreferenceStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = PreferenceStore::at(temp_dir.path().join("nested").join(PREFERENCES_FILE));
        (temp_dir, store)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_keeps_other_keys() {
        let (_dir, store) = temp_store();
        store.set(THEME_KEY, "light").unwrap();
        store.set(MUTED_KEY, "true").unwrap();

        let map = store.load().unwrap();
        assert_eq!(map.get(THEME_KEY).map(String::as_str), Some("light"));
        assert_eq!(map.get(MUTED_KEY).map(String::as_str), Some("true"));
    }

    #[test]
    fn test_file_is_flat_string_object() {
        let (_dir, store) = temp_store();
        store.set_many([(TRACK_KEY, "3"), (MUTED_KEY, "false")]).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value[TRACK_KEY], "3");
        assert_eq!(value[MUTED_KEY], "false");
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_err());
        assert!(store.load_or_default().is_empty());

        // writing replaces the broken file
        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_preferences_file_path() {
        let path = PreferenceStore::preferences_file_path().unwrap();
        assert!(path.to_string_lossy().ends_with("preferences.json"));
    }
}
