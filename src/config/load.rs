use std::{env, path::PathBuf};

use super::schema::Config;

/// Configuration loading helpers.
///
/// `Config::load` reads the optional config file, then environment variables
/// (prefix `LAUNCHTIME__`) on top, and falls back to struct defaults.
impl Config {
    /// Load configuration from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("LAUNCHTIME")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let config: Config = cfg.try_deserialize()?;
        Ok(config)
    }

    /// Perform basic validation checks on loaded configuration.
    pub fn validate(&self) -> Result<(), String> {
        let lib = &self.library;
        if lib.executable_extension.trim_start_matches('.').is_empty() {
            return Err("library.executable_extension must not be empty".to_string());
        }
        if lib.shortcut_extension.trim_start_matches('.').is_empty() {
            return Err("library.shortcut_extension must not be empty".to_string());
        }
        let storage = &self.storage;
        if storage.settings_file.trim().is_empty() || storage.playtime_file.trim().is_empty() {
            return Err("storage file names must not be empty".to_string());
        }
        if storage.settings_file == storage.playtime_file {
            return Err("storage.settings_file and storage.playtime_file must differ".to_string());
        }
        let log = &self.logging.file_name;
        if log.trim().is_empty() {
            return Err("logging.file_name must not be empty".to_string());
        }
        if *log == storage.settings_file || *log == storage.playtime_file {
            return Err("logging.file_name must differ from the storage files".to_string());
        }
        Ok(())
    }

    /// Directory the stores and log file live in.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage.data_dir.clone().or_else(default_data_dir)
    }
}

/// Resolve the config path from `LAUNCHTIME_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("LAUNCHTIME_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/launchtime/config.toml`
/// or `~/.config/launchtime/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        env::var_os("APPDATA").map(PathBuf::from)
    };

    config_home.map(|d| d.join("launchtime").join("config.toml"))
}

/// Compute the default data directory `$XDG_DATA_HOME/launchtime`, falling
/// back to `~/.local/share/launchtime`.
pub fn default_data_dir() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("share"))
    } else {
        env::var_os("LOCALAPPDATA").map(PathBuf::from)
    };

    data_home.map(|d| d.join("launchtime"))
}
