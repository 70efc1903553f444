//! Growth move analysis
//!
//! Finds sustained upward runs in a ticker's daily history: candidate lows,
//! forward tracking with drawdown and continuation detection, and
//! classification into Growth or Superperformance.

mod classify;
mod detector;
mod format;
mod types;

pub use classify::classify;
pub use detector::{percentage_change, MoveDetector};
pub use format::{format_date, format_day, format_output_row, yes_no, OUTPUT_HEADERS};
pub use types::{
    DailyBar, Drawdown, LodCandidate, Move, Performance, TerminationReason, TrackedMove,
};
