//! Error types used across the launcher.
//!
//! None of these are fatal: stores degrade to empty state, scans skip the
//! directory that failed and launches leave playtime untouched.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::library::SourceMode;

/// Failure while writing one of the persisted key-value files.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error originating from [`io::Error`]
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error originating from [`toml::ser::Error`]
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

/// Failure while enumerating one directory of a library folder.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to read directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Failure to start or track a game.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("failed to start {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for {path:?}: {source}")]
    Wait {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Another launch is still running.
    #[error("{0} is still running")]
    Busy(String),

    #[error("no {0} is configured")]
    FolderUnset(SourceMode),

    #[error("{0} is not in the current library")]
    UnknownItem(String),
}
