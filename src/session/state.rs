//! Session state types: the controller's lifecycle and the rows it publishes.

use crate::library::{LibraryItem, SourceMode};

const MILLIS_PER_MINUTE: u64 = 60_000;

/// Where the session controller is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing loaded yet.
    #[default]
    Uninitialized,
    /// Idle; `active` is the folder whose items are published, if any.
    Ready { active: Option<SourceMode> },
    /// Re-reading a folder.
    Scanning(SourceMode),
    /// A game is running; no other launch is accepted until it finishes.
    Launching { name: String },
}

/// One published, launchable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub item: LibraryItem,
    pub accumulated_millis: u64,
}

impl ItemRow {
    pub fn name(&self) -> &str {
        &self.item.name
    }

    /// Whole minutes played, rounded down.
    pub fn minutes(&self) -> u64 {
        self.accumulated_millis / MILLIS_PER_MINUTE
    }

    /// `"<name> (Playtime: <minutes> min)"`
    pub fn label(&self) -> String {
        format!("{} (Playtime: {} min)", self.item.name, self.minutes())
    }
}
