//! Persistence for folder settings and playtime.
//!
//! Both stores are flat TOML key-value files kept strictly apart, so an
//! executable can be called anything without clashing with a settings key.
//! Loading never fails: missing or broken files degrade to empty state and
//! are only logged.

mod file;
mod playtime;
mod settings;

pub use playtime::{Playtime, PlaytimeStore};
pub use settings::{Settings, SettingsStore};
