//! Application module: exposes the view model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the published rows,
//! selection, filter and folder prompt state.

mod model;

pub use model::*;
