use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::library::SourceMode;

use super::file::{read_optional, write_replace};

/// The two folders the user picked. `None` means "never picked".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub games_folder: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcuts_folder: Option<PathBuf>,
}

impl Settings {
    pub fn folder(&self, mode: SourceMode) -> Option<&Path> {
        match mode {
            SourceMode::GamesFolder => self.games_folder.as_deref(),
            SourceMode::ShortcutsFolder => self.shortcuts_folder.as_deref(),
        }
    }

    pub fn set_folder(&mut self, mode: SourceMode, path: PathBuf) {
        match mode {
            SourceMode::GamesFolder => self.games_folder = Some(path),
            SourceMode::ShortcutsFolder => self.shortcuts_folder = Some(path),
        }
    }
}

/// Reads and writes [`Settings`] as a flat `key = "value"` file with keys
/// `gamesFolder` and `shortcutsFolder`.
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

    /// Load settings; a missing or malformed file yields empty settings.
    pub fn load(&self) -> Settings {
        let Some(text) = read_optional(&self.path, "settings") else {
            return Settings::default();
        };

        match toml::from_str::<Settings>(&text) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring malformed settings file {:?}: {e}", self.path);
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let text = toml::to_string(settings)?;
        write_replace(&self.path, &text)?;
        tracing::debug!("Saved settings to {:?}", self.path);
        Ok(())
    }
}
