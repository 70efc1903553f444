//! Growth move types
//!
//! Daily bars in, candidates and drawdowns while tracking, moves out.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::format::{format_day, yes_no};

/// One trading day for a ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trading date (unique within a series)
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Shares traded; only the screener's volume filter reads this
    #[serde(default)]
    pub volume: u64,
}

impl DailyBar {
    /// Create a bar with zero volume
    pub fn new(date: NaiveDate, open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume: 0,
        }
    }

    /// Set the traded volume
    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = volume;
        self
    }
}

/// A day whose low may start a growth move
#[derive(Debug, Clone, PartialEq)]
pub struct LodCandidate {
    pub date: NaiveDate,
    /// Candidate start price (the day's low)
    pub low: Decimal,
    /// Position in the bar series
    pub index: usize,
    /// Percent rise to the best high inside the lookahead window
    pub growth: Decimal,
}

/// A pullback recorded while tracking a move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawdown {
    pub date: NaiveDate,
    /// Decline from the running peak to the close, as a positive percentage
    pub drawdown: Decimal,
    /// Close on the drawdown day
    pub price: Decimal,
}

/// Classification of a completed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Performance {
    /// Does not meet either threshold for its duration band
    None,
    Growth,
    Superperformance,
}

impl Performance {
    /// Growth and Superperformance both qualify
    pub fn is_qualifying(&self) -> bool {
        !matches!(self, Performance::None)
    }
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Performance::None => "None",
            Performance::Growth => "Growth",
            Performance::Superperformance => "Superperformance",
        };
        f.write_str(label)
    }
}

/// Why tracking stopped before the end of the series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerminationReason {
    /// Calendar days since the start exceeded the limit
    MaxTotalDaysExceeded,
    /// A daily low went under the starting LOD
    BelowLod,
    /// Deep drawdown and no new high for too long
    DrawdownWithoutNewHigh { days: u32, drawdown_pct: Decimal },
    /// No new high for too long outside any drawdown band
    NoNewHigh { days: u32, drawdown_pct: Decimal },
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::MaxTotalDaysExceeded => f.write_str("Max total days exceeded"),
            TerminationReason::BelowLod => f.write_str("Price dropped below LOD"),
            TerminationReason::DrawdownWithoutNewHigh { days, drawdown_pct } => write!(
                f,
                "{}+ days without new high after {:.1}% drawdown",
                days, drawdown_pct
            ),
            TerminationReason::NoNewHigh { days, drawdown_pct } => write!(
                f,
                "{}+ days without new high (drawdown: {:.1}%)",
                days, drawdown_pct
            ),
        }
    }
}

/// Result of tracking one candidate, before ticker and display fields are attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedMove {
    pub start_date: NaiveDate,
    /// Date of the peak
    pub end_date: NaiveDate,
    pub start_price: Decimal,
    pub peak_price: Decimal,
    pub growth_percentage: Decimal,
    pub duration_days: i64,
    /// Every drawdown recorded, in arrival order
    pub drawdowns: Vec<Drawdown>,
    pub continuation: bool,
    pub superperformance: Performance,
    pub new_lod_after_drawdown: Option<Decimal>,
    pub termination_reason: Option<TerminationReason>,
}

impl TrackedMove {
    /// Attach the ticker and render the display fields
    pub fn into_move(self, ticker: &str) -> Move {
        let drawdowns: Vec<NaiveDate> = self.drawdowns.iter().map(|d| d.date).collect();
        Move {
            ticker: ticker.to_string(),
            start_date_formatted: format_day(self.start_date),
            end_date_formatted: format_day(self.end_date),
            drawdowns_formatted: drawdowns.iter().copied().map(format_day).collect(),
            continuation_formatted: yes_no(self.continuation),
            superperformance_formatted: yes_no(self.superperformance.is_qualifying()),
            start_date: self.start_date,
            end_date: self.end_date,
            start_price: self.start_price,
            peak_price: self.peak_price,
            growth_percentage: self.growth_percentage,
            duration_days: self.duration_days,
            drawdowns,
            continuation: self.continuation,
            superperformance: self.superperformance,
            new_lod_after_drawdown: self.new_lod_after_drawdown,
            termination_reason: self.termination_reason,
            exchange: None,
            avg_volume: None,
        }
    }
}

/// A tracked growth move
///
/// Only exists for runs whose peak ended above the start price. `exchange` and
/// `avg_volume` are attached later by the screener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub ticker: String,
    pub start_date: NaiveDate,
    /// Date of the peak
    pub end_date: NaiveDate,
    /// The LOD low the move started from
    pub start_price: Decimal,
    pub peak_price: Decimal,
    pub growth_percentage: Decimal,
    /// Calendar days from start to peak
    pub duration_days: i64,
    /// Drawdown dates in the order they were recorded
    pub drawdowns: Vec<NaiveDate>,
    pub continuation: bool,
    pub superperformance: Performance,
    /// Lowest close among drawdowns, set when continuation latched
    pub new_lod_after_drawdown: Option<Decimal>,
    pub termination_reason: Option<TerminationReason>,

    pub start_date_formatted: String,
    pub end_date_formatted: String,
    pub drawdowns_formatted: Vec<String>,
    pub continuation_formatted: String,
    pub superperformance_formatted: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_volume: Option<u64>,
}

impl Move {
    /// Whether this move qualifies as Growth or Superperformance
    pub fn is_valid(&self) -> bool {
        self.superperformance.is_qualifying()
    }

    /// Whether two moves' start-to-peak windows share at least one day
    pub fn overlaps(&self, other: &Move) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}
