use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Read a store file, treating "not there yet" as `None`.
///
/// Any other read error is logged and also yields `None`.
pub(super) fn read_optional(path: &Path, what: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No {what} file at {:?}, starting empty", path);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to read {what} file {:?}: {e}", path);
            None
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("store"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace `path` with `contents` by writing a sibling file and renaming it
/// over the target. The parent directory must already exist.
pub(super) fn write_replace(path: &Path, contents: &str) -> Result<(), StoreError> {
    let tmp = temp_path(path);
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    fs::write(&tmp, contents).map_err(io_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_is_a_sibling() {
        let p = Path::new("/data/playtime.toml");
        assert_eq!(temp_path(p), PathBuf::from("/data/playtime.toml.tmp"));
    }

    #[test]
    fn write_replace_does_not_create_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("settings.toml");

        let err = write_replace(&target, "x = 1\n").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn write_replace_overwrites_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("settings.toml");
        fs::write(&target, "old").unwrap();

        write_replace(&target, "new").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert!(!temp_path(&target).exists());
    }
}
