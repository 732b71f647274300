//! Messages exchanged between the session and the launch worker.

use std::path::PathBuf;

use crate::error::LaunchError;
use crate::library::LibraryItem;

/// A launch the session has accepted and marked as in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub item: LibraryItem,
    /// Folder root the item was scanned from.
    pub root: PathBuf,
}

/// Completion message sent back once the child exited (or failed to start).
#[derive(Debug)]
pub struct LaunchOutcome {
    pub request: LaunchRequest,
    /// Elapsed milliseconds on success.
    pub result: Result<u64, LaunchError>,
}
