use std::env;
use std::sync::{Arc, mpsc};

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::error::LaunchError;
use crate::launch::{LaunchOutcome, Launcher, ProcessLauncher};
use crate::session::SessionController;

mod event_loop;
mod settings;
mod startup;

/// Print the current rows as `name<TAB>millis` and return.
fn print_list(session: &SessionController) {
    for row in session.current_items() {
        println!("{}\t{}", row.name(), row.accumulated_millis);
    }
}

/// Run the row called `name` to exit without the UI and record its playtime.
fn launch_named(
    session: &mut SessionController,
    name: &str,
    launcher: &dyn Launcher,
) -> Result<u64, LaunchError> {
    let item = session
        .current_items()
        .iter()
        .find(|row| row.name() == name)
        .map(|row| row.item.clone())
        .ok_or_else(|| LaunchError::UnknownItem(name.to_string()))?;
    session.on_item_activated(&item, launcher)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = settings::load_config();
    let data_dir = startup::prepare_data_dir(&config);
    startup::init_logging(&data_dir, &config.logging);
    tracing::info!("Starting launchtime with data in {:?}", data_dir);

    let mut session = startup::start_session(&data_dir, &config);

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--list") {
        print_list(&session);
        return Ok(());
    }
    if let Some(pos) = args.iter().position(|a| a == "--launch") {
        let name = args.get(pos + 1).ok_or("--launch needs an item name")?;
        let millis = launch_named(&mut session, name, &ProcessLauncher)?;
        println!("{name}\t{millis}\t{}", session.playtime_of(name));
        return Ok(());
    }

    let mut app = App::new(session.current_items().to_vec());
    session.take_published();

    let (done_tx, done_rx) = mpsc::channel::<LaunchOutcome>();
    let launches = event_loop::LaunchChannel {
        launcher: Arc::new(ProcessLauncher),
        done_tx,
        done_rx,
    };

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(
            &mut terminal,
            &config,
            &mut app,
            &mut session,
            &launches,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        tracing::error!("Event loop failed: {e}");
        event_loop::settle_pending_launch(&mut session, &launches.done_rx);
    }
    run_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::{Settings, SettingsStore};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;

    struct FixedLauncher(Duration);

    impl Launcher for FixedLauncher {
        fn run_to_exit(&self, _path: &Path) -> Result<Duration, LaunchError> {
            Ok(self.0)
        }
    }

    fn session_with_shortcut(dir: &Path) -> SessionController {
        let links = dir.join("links");
        fs::create_dir_all(&links).unwrap();
        fs::write(links.join("Foo.lnk"), b"").unwrap();

        let config = Config::default();
        SettingsStore::new(dir.join(&config.storage.settings_file))
            .save(&Settings {
                games_folder: None,
                shortcuts_folder: Some(links),
            })
            .unwrap();
        startup::start_session(dir, &config)
    }

    #[test]
    fn launch_named_records_playtime_and_persists_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_shortcut(dir.path());

        let millis =
            launch_named(&mut session, "Foo.lnk", &FixedLauncher(Duration::from_millis(1_500)))
                .unwrap();

        assert_eq!(millis, 1_500);
        assert_eq!(session.playtime_of("Foo.lnk"), 1_500);
        let reloaded = startup::start_session(dir.path(), &Config::default());
        assert_eq!(reloaded.playtime_of("Foo.lnk"), 1_500);
    }

    #[test]
    fn launch_named_rejects_names_not_in_the_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_shortcut(dir.path());

        let err = launch_named(&mut session, "Bar.lnk", &FixedLauncher(Duration::ZERO));

        assert!(matches!(err, Err(LaunchError::UnknownItem(name)) if name == "Bar.lnk"));
        assert_eq!(session.playtime_of("Bar.lnk"), 0);
    }
}
