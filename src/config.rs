//! Persisted user settings

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::focus::Mode;

/// Key identifier as stored in the settings file, e.g. `"KeyO"`
pub type KeyIdentifier = KeyCode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Key that retargets the camera (cycles the mode with the modifier held)
    #[serde(default = "default_action_key")]
    pub action_key: KeyIdentifier,
    #[serde(default)]
    pub mode: Mode,
    /// Post on-screen messages on focus and reset
    #[serde(default = "default_show_update_message")]
    pub show_update_message: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            action_key: default_action_key(),
            mode: Mode::default(),
            show_update_message: default_show_update_message(),
        }
    }
}

fn default_action_key() -> KeyIdentifier {
    KeyCode::KeyO
}

fn default_show_update_message() -> bool {
    true
}

/// JSON file backing `Settings`
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Settings> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    /// Load settings, writing defaults when the file does not exist yet.
    /// An unreadable file is replaced by defaults.
    pub fn load_or_create(&self) -> Result<Settings> {
        if !self.path.exists() {
            info!("no settings at {}, writing defaults", self.path.display());
            let settings = Settings::default();
            self.save(&settings)?;
            return Ok(settings);
        }

        match self.load() {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!("{e:#}; falling back to defaults");
                let settings = Settings::default();
                self.save(&settings)?;
                Ok(settings)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.action_key, KeyCode::KeyO);
        assert_eq!(settings.mode, Mode::Smooth);
        assert!(settings.show_update_message);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "mode": "hybrid" }"#).unwrap();
        assert_eq!(settings.mode, Mode::Hybrid);
        assert_eq!(settings.action_key, KeyCode::KeyO);
        assert!(settings.show_update_message);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("plugin").join("settings.json"));

        let settings = store.load_or_create().unwrap();

        assert_eq!(settings, Settings::default());
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let settings = Settings {
            action_key: KeyCode::KeyP,
            mode: Mode::Stock,
            show_update_message: false,
        };

        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_corrupt_file_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let settings = SettingsStore::new(&path).load_or_create().unwrap();

        assert_eq!(settings, Settings::default());
        assert!(fs::read_to_string(&path).unwrap().contains("actionKey"));
    }
}
