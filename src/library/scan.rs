use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::ScanError;

use super::model::{LibraryItem, SourceMode};

fn has_extension(name: &str, ext: &str) -> bool {
    name.ends_with(&format!(".{}", ext.trim_start_matches('.')))
}

fn is_excluded(name: &str, settings: &LibrarySettings) -> bool {
    settings
        .excluded_prefixes
        .iter()
        .filter(|p| !p.is_empty())
        .any(|p| name.starts_with(p.as_str()))
}

fn is_launchable_executable(name: &str, settings: &LibrarySettings) -> bool {
    has_extension(name, &settings.executable_extension) && !is_excluded(name, settings)
}

/// List the direct children of `dir`, keeping only regular files (`want_dirs
/// == false`) or only directories. Errors are logged and end that listing.
fn list_children(dir: &Path, want_dirs: bool, settings: &LibrarySettings) -> Vec<String> {
    let mut names = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(settings.follow_links);

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(source) => {
                let err = ScanError::ReadDir {
                    path: source.path().unwrap_or(dir).to_path_buf(),
                    source,
                };
                tracing::warn!("{err}");
                continue;
            }
        };

        let file_type = entry.file_type();
        let keep = if want_dirs {
            file_type.is_dir()
        } else {
            file_type.is_file()
        };
        if !keep {
            continue;
        }

        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => tracing::debug!("Skipping non UTF-8 entry {:?}", entry.path()),
        }
    }

    names
}

fn scan_shortcuts(root: &Path, settings: &LibrarySettings) -> Vec<LibraryItem> {
    list_children(root, false, settings)
        .into_iter()
        .filter(|name| has_extension(name, &settings.shortcut_extension))
        .map(LibraryItem::shortcut)
        .collect()
}

fn scan_games(root: &Path, settings: &LibrarySettings) -> Vec<LibraryItem> {
    let mut items = Vec::new();

    for sub in list_children(root, true, settings) {
        let found: Vec<LibraryItem> = list_children(&root.join(&sub), false, settings)
            .into_iter()
            .filter(|name| is_launchable_executable(name, settings))
            .map(|name| LibraryItem::executable(sub.clone(), name))
            .collect();

        if found.is_empty() {
            tracing::debug!("No executables in {:?}", root.join(&sub));
        }
        items.extend(found);
    }

    items
}

/// Scan `root` in the given mode and return its launchable items sorted by name.
///
/// Unreadable directories are logged and contribute nothing; the scan never
/// fails as a whole.
pub fn scan(root: &Path, mode: SourceMode, settings: &LibrarySettings) -> Vec<LibraryItem> {
    let mut items = match mode {
        SourceMode::ShortcutsFolder => scan_shortcuts(root, settings),
        SourceMode::GamesFolder => scan_games(root, settings),
    };

    items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.subfolder.cmp(&b.subfolder)));
    tracing::debug!("Scanned {} items from {:?} ({mode})", items.len(), root);
    items
}
