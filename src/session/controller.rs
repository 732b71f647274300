use std::path::PathBuf;

use crate::config::LibrarySettings;
use crate::error::LaunchError;
use crate::launch::{LaunchOutcome, LaunchRequest, Launcher};
use crate::library::{LibraryItem, SourceMode, scan};
use crate::store::{Playtime, PlaytimeStore, Settings, SettingsStore};

use super::state::{ItemRow, SessionState};

/// Owns the folder settings and the playtime map, and drives scanning and
/// launching in response to view events.
///
/// All methods run on one thread; a launch in flight blocks new launches and
/// folder changes until `finish_launch` is called with its outcome.
pub struct SessionController {
    settings_store: SettingsStore,
    playtime_store: PlaytimeStore,
    library: LibrarySettings,

    settings: Settings,
    playtime: Playtime,
    active: Option<SourceMode>,
    items: Vec<LibraryItem>,
    rows: Vec<ItemRow>,

    state: SessionState,
    status: Option<String>,
    published: bool,
}

impl SessionController {
    pub fn new(
        settings_store: SettingsStore,
        playtime_store: PlaytimeStore,
        library: LibrarySettings,
    ) -> Self {
        Self {
            settings_store,
            playtime_store,
            library,
            settings: Settings::default(),
            playtime: Playtime::new(),
            active: None,
            items: Vec::new(),
            rows: Vec::new(),
            state: SessionState::Uninitialized,
            status: None,
            published: false,
        }
    }

    /// Load both stores and scan whichever folder is configured, games first.
    pub fn on_startup(&mut self) {
        self.settings = self.settings_store.load();
        self.playtime = self.playtime_store.load();
        tracing::info!(
            "Loaded settings from {:?} and {} playtime records from {:?}",
            self.settings_store.path(),
            self.playtime.len(),
            self.playtime_store.path()
        );

        let mode = [SourceMode::GamesFolder, SourceMode::ShortcutsFolder]
            .into_iter()
            .find(|m| self.settings.folder(*m).is_some());

        match mode {
            Some(mode) => self.rescan(mode),
            None => {
                tracing::info!("No folder configured yet");
                self.state = SessionState::Ready { active: None };
                self.publish();
            }
        }
    }

    /// Remember `path` as the folder for `mode`, persist it and show its items.
    pub fn on_folder_picked(&mut self, mode: SourceMode, path: PathBuf) {
        if let SessionState::Launching { name } = &self.state {
            let msg = format!("Can't change folders while {name} is running");
            tracing::warn!("{msg}");
            self.status = Some(msg);
            return;
        }

        tracing::info!("Picked {mode}: {:?}", path);
        self.settings.set_folder(mode, path);
        match self.settings_store.save(&self.settings) {
            Ok(()) => self.status = None,
            Err(e) => {
                tracing::error!("Failed to save settings: {e}");
                self.status = Some(format!("Settings not saved: {e}"));
            }
        }

        self.rescan(mode);
    }

    /// Launch `item` through `launcher` on the calling thread and apply the
    /// result. Returns the milliseconds added to its playtime.
    pub fn on_item_activated(
        &mut self,
        item: &LibraryItem,
        launcher: &dyn Launcher,
    ) -> Result<u64, LaunchError> {
        let request = self.begin_launch(item)?;
        let result = launcher.launch(&request.item, &request.root);
        self.finish_launch(LaunchOutcome { request, result })
    }

    /// Accept a launch of `item` and mark it as in flight.
    ///
    /// The caller runs the returned request (usually on a worker thread) and
    /// hands the outcome to [`finish_launch`](Self::finish_launch).
    pub fn begin_launch(&mut self, item: &LibraryItem) -> Result<LaunchRequest, LaunchError> {
        if let SessionState::Launching { name } = &self.state {
            return Err(LaunchError::Busy(name.clone()));
        }

        let mode = item.source_mode;
        let root = self
            .settings
            .folder(mode)
            .ok_or(LaunchError::FolderUnset(mode))?
            .to_path_buf();

        if !self.items.contains(item) {
            return Err(LaunchError::UnknownItem(item.name.clone()));
        }

        tracing::info!("Launching {}", item.name);
        self.state = SessionState::Launching {
            name: item.name.clone(),
        };
        self.status = Some(format!("Playing {}...", item.name));

        Ok(LaunchRequest {
            item: item.clone(),
            root,
        })
    }

    /// Apply a finished launch: add its time, persist playtime and refresh
    /// the rows. A failed launch only logs. Both return to `Ready`.
    pub fn finish_launch(&mut self, outcome: LaunchOutcome) -> Result<u64, LaunchError> {
        let LaunchOutcome { request, result } = outcome;
        let name = request.item.name;
        self.state = SessionState::Ready {
            active: self.active,
        };

        let millis = match result {
            Ok(millis) => millis,
            Err(e) => {
                tracing::error!("Launch of {name} failed: {e}");
                self.status = Some(format!("Could not launch {name}: {e}"));
                self.publish();
                return Err(e);
            }
        };

        let total = self.playtime.entry(name.clone()).or_insert(0);
        *total = total.saturating_add(millis);
        tracing::info!("{name} ran for {millis} ms, {} ms in total", *total);

        self.status = Some(format!("Played {name} for {} min", millis / 60_000));
        if let Err(e) = self.playtime_store.save(&self.playtime) {
            tracing::error!("Failed to save playtime: {e}");
            self.status = Some(format!("Playtime not saved: {e}"));
        }

        self.refresh();
        Ok(millis)
    }

    /// Re-scan the folder currently shown, if any.
    pub fn refresh(&mut self) {
        if matches!(self.state, SessionState::Launching { .. }) {
            return;
        }
        match self.active {
            Some(mode) => self.rescan(mode),
            None => self.publish(),
        }
    }

    fn rescan(&mut self, mode: SourceMode) {
        let Some(root) = self.settings.folder(mode).map(|p| p.to_path_buf()) else {
            tracing::debug!("Not scanning {mode}: none configured");
            return;
        };

        self.state = SessionState::Scanning(mode);
        self.items = scan(&root, mode, &self.library);
        self.active = Some(mode);
        self.state = SessionState::Ready { active: Some(mode) };

        if self.items.is_empty() {
            tracing::warn!("Nothing launchable found in {:?}", root);
        }
        self.publish();
    }

    fn publish(&mut self) {
        self.rows = self
            .items
            .iter()
            .map(|item| ItemRow {
                item: item.clone(),
                accumulated_millis: self.playtime_of(&item.name),
            })
            .collect();
        self.published = true;
    }

    /// Rows for the view, sorted by name.
    pub fn current_items(&self) -> &[ItemRow] {
        &self.rows
    }

    /// Returns `true` once after each publish, so the view knows to re-read rows.
    pub fn take_published(&mut self) -> bool {
        std::mem::take(&mut self.published)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn active_mode(&self) -> Option<SourceMode> {
        self.active
    }

    pub fn is_launching(&self) -> bool {
        matches!(self.state, SessionState::Launching { .. })
    }

    /// Last thing worth telling the user, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn playtime_of(&self, name: &str) -> u64 {
        self.playtime.get(name).copied().unwrap_or(0)
    }
}
