//! Launch module: starts a game, waits for it to exit and reports how long
//! it ran.
//!
//! The wait happens on a worker thread (`spawn_launch`); the outcome comes
//! back over a channel so the UI thread stays the only writer of playtime.

mod tracker;
mod types;
mod worker;

pub use tracker::{Launcher, ProcessLauncher};
pub use types::{LaunchOutcome, LaunchRequest};
pub use worker::spawn_launch;

#[cfg(test)]
mod tests;
