use crate::config;

pub fn load_config() -> config::Config {
    match config::Config::load() {
        Ok(c) => {
            if let Err(msg) = c.validate() {
                eprintln!("launchtime: invalid config, using defaults: {msg}");
                config::Config::default()
            } else {
                c
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("launchtime: failed to load config, using defaults: {e}");
            config::Config::default()
        }
    }
}
