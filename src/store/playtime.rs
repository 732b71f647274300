use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

use super::file::{read_optional, write_replace};

/// Accumulated milliseconds per executable or shortcut name.
pub type Playtime = BTreeMap<String, u64>;

/// Reads and writes [`Playtime`] as a flat `"name" = millis` file.
#[derive(Debug, Clone)]
pub struct PlaytimeStore {
    path: PathBuf,
}

impl PlaytimeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records.
    ///
    /// An entry whose value is not a non-negative integer is skipped with a
    /// warning; the rest of the file still loads.
    pub fn load(&self) -> Playtime {
        let mut playtime = Playtime::new();

        let Some(text) = read_optional(&self.path, "playtime") else {
            return playtime;
        };

        let table = match toml::from_str::<toml::Table>(&text) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("Ignoring malformed playtime file {:?}: {e}", self.path);
                return playtime;
            }
        };

        for (name, value) in table {
            match value.as_integer().and_then(|n| u64::try_from(n).ok()) {
                Some(millis) => {
                    playtime.insert(name, millis);
                }
                None => {
                    tracing::warn!("Skipping playtime entry {name:?}: {value} is not a valid millisecond count");
                }
            }
        }

        tracing::debug!("Loaded {} playtime records from {:?}", playtime.len(), self.path);
        playtime
    }

    pub fn save(&self, playtime: &Playtime) -> Result<(), StoreError> {
        let text = toml::to_string(playtime)?;
        write_replace(&self.path, &text)?;
        tracing::debug!("Saved {} playtime records to {:?}", playtime.len(), self.path);
        Ok(())
    }
}
