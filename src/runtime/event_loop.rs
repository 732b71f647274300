use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::launch::{LaunchOutcome, Launcher, spawn_launch};
use crate::library::SourceMode;
use crate::session::{SessionController, SessionState};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Quit was asked for while a game was running; exit once it finishes.
    pub quit_requested: bool,
}

/// Everything the loop needs to start launches.
pub struct LaunchChannel {
    pub launcher: Arc<dyn Launcher>,
    pub done_tx: Sender<LaunchOutcome>,
    pub done_rx: Receiver<LaunchOutcome>,
}

/// Copy what the session published into the view model.
fn sync_from_session(app: &mut App, session: &mut SessionController) {
    if session.take_published() {
        app.set_rows(session.current_items().to_vec());
    }
    app.status = session.status().map(str::to_string);
    app.active_mode = session.active_mode();
    app.active_dir = app
        .active_mode
        .and_then(|m| session.settings().folder(m))
        .map(|p| p.display().to_string());
    app.launching = match session.state() {
        SessionState::Launching { name } => Some(name.clone()),
        _ => None,
    };
}

/// Main terminal event loop: handles input, drawing and launch completions.
/// Returns `Ok(())` when shutdown is requested and no game is running.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    config: &config::Config,
    app: &mut App,
    session: &mut SessionController,
    launches: &LaunchChannel,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // The session is only ever mutated here, on this thread.
        while let Ok(outcome) = launches.done_rx.try_recv() {
            // Failures are already logged and put on the status line.
            if let Err(e) = session.finish_launch(outcome) {
                tracing::debug!("Launch outcome applied with error: {e}");
            }
        }

        sync_from_session(app, session);

        if state.quit_requested && !session.is_launching() {
            tracing::info!("Shutting down");
            return Ok(());
        }

        let display = app.display_indices();
        terminal.draw(|f| ui::draw(f, app, &display, &config.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.notice = None;
                handle_key_event(key, app, session, launches, state);
            }
        }
    }
}

/// Block until a running game reports back so its playtime is saved.
///
/// Used when the loop exits early on an error while a launch is in flight.
pub fn settle_pending_launch(session: &mut SessionController, done_rx: &Receiver<LaunchOutcome>) {
    if !session.is_launching() {
        return;
    }
    tracing::info!("Waiting for the running game before exiting");
    match done_rx.recv() {
        Ok(outcome) => {
            let _ = session.finish_launch(outcome);
        }
        Err(e) => tracing::error!("Launch worker went away: {e}"),
    }
}

fn start_selected_launch(app: &mut App, session: &mut SessionController, launches: &LaunchChannel) {
    let Some(row) = app.selected_row() else {
        return;
    };

    match session.begin_launch(&row.item) {
        Ok(request) => {
            app.launching = Some(request.item.name.clone());
            spawn_launch(request, launches.launcher.clone(), launches.done_tx.clone());
        }
        Err(e) => {
            tracing::warn!("Launch refused: {e}");
            app.notice = Some(e.to_string());
        }
    }
}

fn handle_prompt_key(key: KeyEvent, app: &mut App, session: &mut SessionController) {
    match key.code {
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Backspace => {
            if let Some(p) = app.prompt.as_mut() {
                p.input.pop();
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(p) = app.prompt.as_mut() {
                p.input.clear();
            }
        }
        KeyCode::Enter => match app.take_prompt() {
            Some((mode, path)) => session.on_folder_picked(mode, path),
            None => app.notice = Some("No folder entered".to_string()),
        },
        KeyCode::Char(c) if !c.is_control() => {
            if let Some(p) = app.prompt.as_mut() {
                p.input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_filter_key(key: KeyEvent, app: &mut App, session: &mut SessionController, launches: &LaunchChannel) {
    match key.code {
        KeyCode::Esc => app.clear_filter(),
        KeyCode::Backspace => app.pop_filter_char(),
        KeyCode::Char('j') | KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.next()
        }
        KeyCode::Char('k') | KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.prev()
        }
        KeyCode::Char(c) if !c.is_control() => app.push_filter_char(c),
        KeyCode::Enter => {
            if app.display_indices().is_empty() {
                return;
            }
            app.exit_filter_mode();
            start_selected_launch(app, session, launches);
        }
        _ => {}
    }
}

fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    session: &mut SessionController,
    launches: &LaunchChannel,
    state: &mut EventLoopState,
) {
    if state.quit_requested {
        return;
    }

    if app.prompt.is_some() {
        handle_prompt_key(key, app, session);
        return;
    }

    if app.filter_mode {
        state.pending_gg = false;
        handle_filter_key(key, app, session, launches);
        return;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => {
            if let Some(name) = &app.launching {
                app.notice = Some(format!("Waiting for {name} to exit before quitting"));
            }
            state.quit_requested = true;
        }
        KeyCode::Char('/') => app.enter_filter_mode(),
        KeyCode::Char('f') | KeyCode::Char('F') if session.is_launching() => {
            app.notice = Some("Folders can be changed once the game exits".to_string());
        }
        KeyCode::Char('f') => app.open_prompt(
            SourceMode::GamesFolder,
            session.settings().folder(SourceMode::GamesFolder),
        ),
        KeyCode::Char('F') => app.open_prompt(
            SourceMode::ShortcutsFolder,
            session.settings().folder(SourceMode::ShortcutsFolder),
        ),
        KeyCode::Char('r') => session.refresh(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                if let Some(&first) = app.display_indices().first() {
                    app.set_selected(first);
                }
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            if let Some(&last) = app.display_indices().last() {
                app.set_selected(last);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => {
            if app.launching.is_some() {
                app.notice = Some("A game is already running".to_string());
            } else if app.has_rows() {
                start_selected_launch(app, session, launches);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LibrarySettings;
    use crate::launch::LaunchRequest;
    use crate::store::{PlaytimeStore, Settings, SettingsStore};
    use std::fs;
    use std::sync::mpsc;

    fn launching_session(dir: &std::path::Path) -> (SessionController, LaunchRequest) {
        let links = dir.join("links");
        fs::create_dir_all(&links).unwrap();
        fs::write(links.join("Foo.lnk"), b"").unwrap();
        let settings = SettingsStore::new(dir.join("settings.toml"));
        settings
            .save(&Settings {
                games_folder: None,
                shortcuts_folder: Some(links),
            })
            .unwrap();

        let mut session = SessionController::new(
            settings,
            PlaytimeStore::new(dir.join("playtime.toml")),
            LibrarySettings::default(),
        );
        session.on_startup();
        let item = session.current_items()[0].item.clone();
        let request = session.begin_launch(&item).unwrap();
        (session, request)
    }

    #[test]
    fn settle_pending_launch_waits_for_the_outcome_and_saves_it() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, request) = launching_session(dir.path());
        let (tx, rx) = mpsc::channel();

        let sender = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            tx.send(LaunchOutcome {
                request,
                result: Ok(4_000),
            })
            .unwrap();
        });
        settle_pending_launch(&mut session, &rx);
        sender.join().unwrap();

        assert!(!session.is_launching());
        assert_eq!(session.playtime_of("Foo.lnk"), 4_000);
        let saved = PlaytimeStore::new(dir.path().join("playtime.toml")).load();
        assert_eq!(saved.get("Foo.lnk"), Some(&4_000));
    }

    #[test]
    fn settle_pending_launch_returns_when_worker_is_gone() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _request) = launching_session(dir.path());
        let (tx, rx) = mpsc::channel::<LaunchOutcome>();
        drop(tx);

        settle_pending_launch(&mut session, &rx);

        assert_eq!(session.playtime_of("Foo.lnk"), 0);
    }
}
