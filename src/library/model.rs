use std::fmt;
use std::path::{Path, PathBuf};

/// Which configured folder an item was found in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SourceMode {
    /// One subdirectory per game, executables directly inside each.
    GamesFolder,
    /// A flat folder of shortcut files.
    ShortcutsFolder,
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GamesFolder => f.write_str("games folder"),
            Self::ShortcutsFolder => f.write_str("shortcuts folder"),
        }
    }
}

/// A launchable entry produced by a scan.
///
/// `name` is the bare filename and doubles as the playtime key, so two
/// executables with the same name in different subfolders share one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryItem {
    pub name: String,
    pub source_mode: SourceMode,
    /// Subdirectory of the games folder this executable lives in.
    pub subfolder: Option<String>,
}

impl LibraryItem {
    pub fn shortcut(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_mode: SourceMode::ShortcutsFolder,
            subfolder: None,
        }
    }

    pub fn executable(subfolder: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_mode: SourceMode::GamesFolder,
            subfolder: Some(subfolder.into()),
        }
    }

    /// Absolute path of the file this item points at, given its folder root.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        match &self.subfolder {
            Some(sub) => root.join(sub).join(&self.name),
            None => root.join(&self.name),
        }
    }
}
