use super::tracker::duration_millis;
use super::*;
use crate::error::LaunchError;
use crate::library::LibraryItem;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

/// Records the paths it was asked to run and reports a fixed duration.
struct FixedLauncher {
    elapsed: Duration,
    seen: Mutex<Vec<PathBuf>>,
}

impl Launcher for FixedLauncher {
    fn run_to_exit(&self, path: &Path) -> Result<Duration, LaunchError> {
        self.seen.lock().unwrap().push(path.to_path_buf());
        Ok(self.elapsed)
    }
}

#[test]
fn duration_millis_truncates_sub_millisecond_parts() {
    assert_eq!(duration_millis(Duration::from_micros(2_999)), 2);
    assert_eq!(duration_millis(Duration::from_secs(2)), 2_000);
}

#[test]
fn launch_resolves_item_path_and_reports_millis() {
    let launcher = FixedLauncher {
        elapsed: Duration::from_millis(2_000),
        seen: Mutex::new(Vec::new()),
    };

    let item = LibraryItem::executable("GameA", "GameA.exe");
    let millis = launcher.launch(&item, Path::new("/games")).unwrap();

    assert_eq!(millis, 2_000);
    assert_eq!(
        *launcher.seen.lock().unwrap(),
        vec![PathBuf::from("/games/GameA/GameA.exe")]
    );
}

#[test]
fn spawn_launch_delivers_outcome_over_channel() {
    let launcher: Arc<dyn Launcher> = Arc::new(FixedLauncher {
        elapsed: Duration::from_millis(1_500),
        seen: Mutex::new(Vec::new()),
    });
    let (tx, rx) = mpsc::channel();
    let request = LaunchRequest {
        item: LibraryItem::shortcut("Foo.lnk"),
        root: PathBuf::from("/links"),
    };

    spawn_launch(request.clone(), launcher, tx).join().unwrap();

    let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(outcome.request, request);
    assert_eq!(outcome.result.unwrap(), 1_500);
}

#[test]
fn process_launcher_reports_spawn_failure_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let item = LibraryItem::executable("Nothing", "Missing.exe");

    let err = ProcessLauncher.launch(&item, dir.path()).unwrap_err();

    match err {
        LaunchError::Spawn { path, .. } => {
            assert_eq!(path, dir.path().join("Nothing").join("Missing.exe"));
        }
        other => panic!("expected spawn error, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn process_launcher_waits_for_child_exit() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let game_dir = dir.path().join("Sleepy");
    fs::create_dir_all(&game_dir).unwrap();
    let script = game_dir.join("sleepy.exe");
    fs::write(&script, "#!/bin/sh\nsleep 0.3\nexit 3\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let item = LibraryItem::executable("Sleepy", "sleepy.exe");
    let millis = ProcessLauncher.launch(&item, dir.path()).unwrap();

    // A non-zero exit still counts as played time.
    assert!(millis >= 300, "expected at least 300 ms, got {millis}");
}
