//! Session module: the orchestrator between the view, the scanner, the
//! launch tracker and the two stores.

mod controller;
mod state;

pub use controller::SessionController;
pub use state::{ItemRow, SessionState};
