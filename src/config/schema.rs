use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application configuration loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/launchtime/config.toml` or `~/.config/launchtime/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LAUNCHTIME__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the settings, playtime and log files.
    /// Defaults to `$XDG_DATA_HOME/launchtime` or `~/.local/share/launchtime`.
    pub data_dir: Option<PathBuf>,
    /// File name of the folder settings store inside `data_dir`.
    pub settings_file: String,
    /// File name of the playtime store inside `data_dir`.
    pub playtime_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            settings_file: "settings.toml".to_string(),
            playtime_file: "playtime.toml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Extension (without dot) of the executables listed from the games folder.
    /// Matched case-sensitively.
    pub executable_extension: String,
    /// Extension (without dot) of the files listed from the shortcuts folder.
    pub shortcut_extension: String,
    /// Executables whose name starts with any of these are skipped
    /// (engine crash handlers, uninstallers).
    pub excluded_prefixes: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            executable_extension: "exe".to_string(),
            shortcut_extension: "lnk".to_string(),
            excluded_prefixes: vec!["Unity".into(), "unins".into()],
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Show the game subfolder next to each executable.
    pub show_subfolder: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ pick a game, we'll keep the time ~ ".to_string(),
            show_subfolder: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Log file name inside the data directory.
    pub file_name: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file_name: "launchtime.log".to_string(),
        }
    }
}
