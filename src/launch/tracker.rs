use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};

use crate::error::LaunchError;
use crate::library::LibraryItem;

/// Convert a duration to whole milliseconds, saturating at `u64::MAX`.
pub(super) fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Something that can run a file to completion and time it.
pub trait Launcher: Send + Sync {
    /// Run `path` and block until it exits, returning the wall-clock time it ran.
    fn run_to_exit(&self, path: &Path) -> Result<Duration, LaunchError>;

    /// Resolve `item` against `root`, run it and return elapsed milliseconds.
    fn launch(&self, item: &LibraryItem, root: &Path) -> Result<u64, LaunchError> {
        let path = item.resolve(root);
        let elapsed = self.run_to_exit(&path)?;
        Ok(duration_millis(elapsed))
    }
}

/// Spawns the file directly: no arguments, no shell, inherited stdio,
/// working directory and environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn run_to_exit(&self, path: &Path) -> Result<Duration, LaunchError> {
        let started = Instant::now();

        let mut child = Command::new(path)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!("Started {:?} (pid {})", path, child.id());

        let status = child.wait().map_err(|source| LaunchError::Wait {
            path: path.to_path_buf(),
            source,
        })?;
        let elapsed = started.elapsed();

        if status.success() {
            tracing::info!("{:?} exited after {} ms", path, elapsed.as_millis());
        } else {
            // The game still ran, so its time still counts.
            tracing::warn!(
                "{:?} exited with {status} after {} ms",
                path,
                elapsed.as_millis()
            );
        }

        Ok(elapsed)
    }
}
