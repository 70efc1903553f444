//! Screener module
//!
//! Runs the move detector over a ticker universe:
//! - Universe discovery and filtering
//! - Volume filter and per-ticker analysis
//! - Overlap consolidation of the collected moves

mod consolidate;
mod report;
mod runner;
mod types;
mod universe;

pub use consolidate::consolidate_overlapping_moves;
pub use report::ScanReport;
pub use runner::{average_volume, Screener, TickerOutcome};
pub use types::ScreenerError;
pub use universe::{Listing, Universe, UNKNOWN_EXCHANGE};
