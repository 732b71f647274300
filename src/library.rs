//! Library module: turns a games or shortcuts folder into launchable items.
//!
//! `scan` lives in `library::scan`, the item types in `library::model`.

mod model;
mod scan;

pub use model::*;
pub use scan::scan;

#[cfg(test)]
mod tests;
