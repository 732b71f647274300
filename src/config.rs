//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema (storage locations, scan
//! filters, UI and logging knobs) and helpers to load it from disk.

mod load;
mod schema;

pub use schema::*;
