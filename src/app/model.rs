//! Application model types: `App` and the folder prompt.
//!
//! The `App` struct holds what the terminal view shows: the published rows,
//! the selection, the fuzzy filter and the folder prompt. It never touches
//! playtime or settings; those belong to the session controller.

use std::env;
use std::path::{Path, PathBuf};

use crate::library::SourceMode;
use crate::session::ItemRow;

/// The in-progress folder path being typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPrompt {
    pub mode: SourceMode,
    pub input: String,
}

/// The main view model.
pub struct App {
    pub rows: Vec<ItemRow>,
    pub selected: usize,

    lower_names: Vec<String>,

    pub filter_mode: bool,
    pub filter_query: String,
    pub prompt: Option<FolderPrompt>,

    /// Name of the game currently running, if any.
    pub launching: Option<String>,
    /// Message from the session controller.
    pub status: Option<String>,
    /// Short-lived message from the view itself; cleared on the next key.
    pub notice: Option<String>,
    pub active_mode: Option<SourceMode>,
    pub active_dir: Option<String>,
}

impl App {
    /// Create a new `App` with the provided `rows`.
    pub fn new(rows: Vec<ItemRow>) -> Self {
        let mut app = Self {
            rows: Vec::new(),
            selected: 0,
            lower_names: Vec::new(),
            filter_mode: false,
            filter_query: String::new(),
            prompt: None,
            launching: None,
            status: None,
            notice: None,
            active_mode: None,
            active_dir: None,
        };
        app.set_rows(rows);
        app
    }

    /// Replace the rows, keeping the cursor on the same item when it is still listed.
    pub fn set_rows(&mut self, rows: Vec<ItemRow>) {
        let previous = self.selected_row().map(|r| r.item.clone());

        self.lower_names = rows.iter().map(|r| r.name().to_lowercase()).collect();
        self.rows = rows;
        self.selected = previous
            .and_then(|item| self.rows.iter().position(|r| r.item == item))
            .unwrap_or(0);
        self.ensure_selected_visible();
    }

    pub fn selected_row(&self) -> Option<&ItemRow> {
        self.rows.get(self.selected)
    }

    /// Return the display order of row indices after filtering.
    pub fn display_indices(&self) -> Vec<usize> {
        let query = self.filter_query.trim();
        if query.is_empty() {
            return (0..self.rows.len()).collect();
        }

        let query_lower = query.to_lowercase();
        (0..self.rows.len())
            .filter(|&i| Self::fuzzy_match_positions(&self.lower_names[i], &query_lower).is_some())
            .collect()
    }

    /// Fuzzy-match the active filter against row `index`, returning matched char positions.
    pub fn filter_positions(&self, index: usize) -> Option<Vec<usize>> {
        let query = self.filter_query.trim().to_lowercase();
        Self::fuzzy_match_positions(self.lower_names.get(index)?, &query)
    }

    /// Fuzzy/subsequence match: return the character positions in `title`
    /// that match `query`, or `None` if not matched. Comparison is
    /// ASCII case-insensitive.
    pub fn fuzzy_match_positions(title: &str, query: &str) -> Option<Vec<usize>> {
        if query.is_empty() {
            return Some(Vec::new());
        }

        let mut positions: Vec<usize> = Vec::new();
        let mut title_iter = title.chars().enumerate();

        for qc in query.chars() {
            let qc_low = qc.to_ascii_lowercase();
            loop {
                match title_iter.next() {
                    Some((ti, tc)) if tc.to_ascii_lowercase() == qc_low => {
                        positions.push(ti);
                        break;
                    }
                    Some(_) => continue,
                    None => return None,
                }
            }
        }

        Some(positions)
    }

    /// Return the next visible index after `current`, wrapping around.
    pub fn next_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Return the previous visible index before `current`, wrapping around.
    pub fn prev_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(0) | None => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
        }
    }

    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
        self.ensure_selected_visible();
    }

    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
        self.ensure_selected_visible();
    }

    pub fn exit_filter_mode(&mut self) {
        self.filter_mode = false;
    }

    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.filter_mode = false;
        self.ensure_selected_visible();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.ensure_selected_visible();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.ensure_selected_visible();
    }

    /// Ensure `selected` is visible under the filter, otherwise jump to the
    /// first visible row.
    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.selected = 0;
            return;
        }

        if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }

    pub fn next(&mut self) {
        if let Some(next) = self.next_in_view_from(self.selected) {
            self.selected = next;
        }
    }

    pub fn prev(&mut self) {
        if let Some(prev) = self.prev_in_view_from(self.selected) {
            self.selected = prev;
        }
    }

    /// Open the folder prompt for `mode`, prefilled with the saved path.
    pub fn open_prompt(&mut self, mode: SourceMode, current: Option<&Path>) {
        self.prompt = Some(FolderPrompt {
            mode,
            input: current.map(|p| p.display().to_string()).unwrap_or_default(),
        });
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    /// Close the prompt and return the picked folder as an absolute path.
    ///
    /// Returns `None` (and keeps the prompt closed) when the input is blank.
    pub fn take_prompt(&mut self) -> Option<(SourceMode, PathBuf)> {
        let prompt = self.prompt.take()?;
        let input = prompt.input.trim();
        if input.is_empty() {
            return None;
        }
        Some((prompt.mode, absolutize(&expand_home(input))))
    }
}

fn expand_home(input: &str) -> PathBuf {
    match (input.strip_prefix("~/"), env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ if input == "~" => env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(input)),
        _ => PathBuf::from(input),
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
