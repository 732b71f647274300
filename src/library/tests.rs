use super::*;
use crate::config::LibrarySettings;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn names(items: &[LibraryItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

fn touch(path: &Path) {
    fs::write(path, b"").unwrap();
}

#[test]
fn games_scan_skips_unity_and_uninstallers() {
    let dir = tempdir().unwrap();
    let game = dir.path().join("GameA");
    fs::create_dir_all(&game).unwrap();
    touch(&game.join("GameA.exe"));
    touch(&game.join("UnityCrashHandler.exe"));
    touch(&game.join("unins000.exe"));

    let items = scan(dir.path(), SourceMode::GamesFolder, &LibrarySettings::default());

    assert_eq!(
        items,
        vec![LibraryItem::executable("GameA", "GameA.exe")]
    );
}

#[test]
fn games_scan_flattens_subfolders_sorted_and_ignores_root_files() {
    let dir = tempdir().unwrap();
    for (sub, exe) in [("Zeta", "zeta.exe"), ("Alpha", "Alpha.exe"), ("Mid", "Beta.exe")] {
        let p = dir.path().join(sub);
        fs::create_dir_all(&p).unwrap();
        touch(&p.join(exe));
        touch(&p.join("notes.txt"));
    }
    touch(&dir.path().join("Loose.exe"));
    let nested = dir.path().join("Mid").join("bin");
    fs::create_dir_all(&nested).unwrap();
    touch(&nested.join("Deep.exe"));

    let items = scan(dir.path(), SourceMode::GamesFolder, &LibrarySettings::default());

    assert_eq!(names(&items), vec!["Alpha.exe", "Beta.exe", "zeta.exe"]);
    assert_eq!(items[1].subfolder.as_deref(), Some("Mid"));
    assert!(items.iter().all(|i| i.source_mode == SourceMode::GamesFolder));
}

#[test]
fn games_scan_keeps_same_name_from_two_subfolders() {
    let dir = tempdir().unwrap();
    for sub in ["B", "A"] {
        let p = dir.path().join(sub);
        fs::create_dir_all(&p).unwrap();
        touch(&p.join("launcher.exe"));
    }

    let items = scan(dir.path(), SourceMode::GamesFolder, &LibrarySettings::default());

    assert_eq!(names(&items), vec!["launcher.exe", "launcher.exe"]);
    assert_eq!(items[0].subfolder.as_deref(), Some("A"));
    assert_eq!(items[1].subfolder.as_deref(), Some("B"));
}

#[test]
fn shortcuts_scan_lists_only_lnk_files_without_recursing() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("Foo.lnk"));
    touch(&dir.path().join("Foo.txt"));
    let sub = dir.path().join("more");
    fs::create_dir_all(&sub).unwrap();
    touch(&sub.join("Bar.lnk"));

    let items = scan(
        dir.path(),
        SourceMode::ShortcutsFolder,
        &LibrarySettings::default(),
    );

    assert_eq!(items, vec![LibraryItem::shortcut("Foo.lnk")]);
}

#[test]
fn files_named_only_by_extension_are_listed() {
    let dir = tempdir().unwrap();
    let games = dir.path().join("games");
    let sub = games.join("Odd");
    fs::create_dir_all(&sub).unwrap();
    touch(&sub.join(".exe"));

    let links = dir.path().join("links");
    fs::create_dir_all(&links).unwrap();
    touch(&links.join(".lnk"));

    let settings = LibrarySettings::default();
    assert_eq!(
        scan(&games, SourceMode::GamesFolder, &settings),
        vec![LibraryItem::executable("Odd", ".exe")]
    );
    assert_eq!(
        scan(&links, SourceMode::ShortcutsFolder, &settings),
        vec![LibraryItem::shortcut(".lnk")]
    );
}

#[test]
fn missing_root_yields_empty_list() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("not-there");

    assert!(scan(&missing, SourceMode::GamesFolder, &LibrarySettings::default()).is_empty());
    assert!(scan(&missing, SourceMode::ShortcutsFolder, &LibrarySettings::default()).is_empty());
}

#[cfg(unix)]
#[test]
fn unreadable_subfolder_does_not_abort_scan() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let good = dir.path().join("Good");
    let locked = dir.path().join("Locked");
    fs::create_dir_all(&good).unwrap();
    fs::create_dir_all(&locked).unwrap();
    touch(&good.join("Good.exe"));
    touch(&locked.join("Locked.exe"));
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let items = scan(dir.path(), SourceMode::GamesFolder, &LibrarySettings::default());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    // Root may bypass permission bits, in which case both are listed.
    assert!(names(&items).contains(&"Good.exe"));
}

#[test]
fn resolve_joins_subfolder_for_games_and_root_for_shortcuts() {
    let root = Path::new("/games");
    assert_eq!(
        LibraryItem::executable("GameA", "GameA.exe").resolve(root),
        root.join("GameA").join("GameA.exe")
    );
    assert_eq!(
        LibraryItem::shortcut("Foo.lnk").resolve(root),
        root.join("Foo.lnk")
    );
}
