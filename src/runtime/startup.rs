use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{self, LoggingSettings};
use crate::session::SessionController;
use crate::store::{PlaytimeStore, SettingsStore};

/// Resolve and create the data directory. Falls back to the working
/// directory when no home directory can be found.
pub fn prepare_data_dir(config: &config::Config) -> PathBuf {
    let dir = config.data_dir().unwrap_or_else(|| {
        eprintln!("launchtime: no home directory found, keeping data in the current directory");
        PathBuf::from(".")
    });

    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("launchtime: cannot create data directory {dir:?}: {e}");
    }
    dir
}

/// Send `tracing` output to a log file in `dir`; the terminal belongs to the UI.
///
/// `RUST_LOG` wins over the configured filter. If the file cannot be opened,
/// logging stays off.
pub fn init_logging(dir: &Path, logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let path = dir.join(&logging.file_name);
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("launchtime: logging disabled, cannot open {path:?}: {e}");
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

/// Build the session controller over the stores in `dir` and run its startup.
pub fn start_session(dir: &Path, config: &config::Config) -> SessionController {
    let mut session = SessionController::new(
        SettingsStore::new(dir.join(&config.storage.settings_file)),
        PlaytimeStore::new(dir.join(&config.storage.playtime_file)),
        config.library.clone(),
    );
    session.on_startup();
    session
}
