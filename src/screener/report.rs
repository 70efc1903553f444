//! Scan results and run summary

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::runner::TickerOutcome;
use super::types::ScreenerError;
use crate::analysis::{Move, Performance};

/// Outcome of one screener run
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Unique id for this run
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Unset until the run completes
    pub finished_at: Option<DateTime<Utc>>,
    /// Listings in the universe
    pub tickers_total: usize,
    pub tickers_analyzed: usize,
    pub tickers_no_data: usize,
    pub tickers_low_volume: usize,
    pub tickers_failed: usize,
    /// Stopped before every listing was scanned
    pub interrupted: bool,
    /// Qualifying moves in universe order
    pub moves: Vec<Move>,
}

impl ScanReport {
    /// Start an empty report for a universe of `tickers_total` listings
    pub fn new(tickers_total: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            tickers_total,
            tickers_analyzed: 0,
            tickers_no_data: 0,
            tickers_low_volume: 0,
            tickers_failed: 0,
            interrupted: false,
            moves: Vec::new(),
        }
    }

    /// Fold one ticker's outcome into the counters
    pub fn record(&mut self, outcome: Result<TickerOutcome, ScreenerError>) {
        match outcome {
            Ok(TickerOutcome::Analyzed { moves, .. }) => {
                self.tickers_analyzed += 1;
                self.moves.extend(moves);
            }
            Ok(TickerOutcome::NoData) => self.tickers_no_data += 1,
            Ok(TickerOutcome::LowVolume(_)) => self.tickers_low_volume += 1,
            Err(_) => self.tickers_failed += 1,
        }
    }

    /// Stamp the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock seconds from start to finish (or now, if still running)
    pub fn elapsed_secs(&self) -> i64 {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_seconds()
    }

    /// Listings whose outcome was recorded
    pub fn tickers_processed(&self) -> usize {
        self.tickers_analyzed + self.tickers_no_data + self.tickers_low_volume + self.tickers_failed
    }

    /// Moves with the given classification
    pub fn count_performance(&self, performance: Performance) -> usize {
        self.moves
            .iter()
            .filter(|m| m.superperformance == performance)
            .count()
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        format!(
            r#"
══════════════════════════════════════════════════════
               SCAN RESULTS
══════════════════════════════════════════════════════
Run:              {}
Status:           {}
Elapsed:          {}s

TICKERS
───────────────────────────────────────────────────────
Total:            {}
Processed:        {}
Analyzed:         {}
No Data:          {}
Low Volume:       {}
Failed:           {}

MOVES
───────────────────────────────────────────────────────
Total:            {}
Superperformance: {}
Growth:           {}
══════════════════════════════════════════════════════
"#,
            self.run_id,
            if self.interrupted { "interrupted" } else { "complete" },
            self.elapsed_secs(),
            self.tickers_total,
            self.tickers_processed(),
            self.tickers_analyzed,
            self.tickers_no_data,
            self.tickers_low_volume,
            self.tickers_failed,
            self.moves.len(),
            self.count_performance(Performance::Superperformance),
            self.count_performance(Performance::Growth),
        )
    }
}
