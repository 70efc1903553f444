//! Growth move detector
//!
//! Scans a ticker's daily bars for LOD candidates, then tracks each candidate
//! forward day by day: running peak, drawdowns from that peak, continuation
//! after a drawdown, and the rules that end a move.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::borrow::Cow;
use std::collections::HashSet;

use super::classify::classify;
use super::types::{DailyBar, Drawdown, LodCandidate, Move, Performance, TerminationReason, TrackedMove};
use crate::config::DetectionConfig;

const HUNDRED: Decimal = dec!(100);

/// Percentage change from `start` to `end`
///
/// Returns zero for a zero start price.
pub fn percentage_change(start: Decimal, end: Decimal) -> Decimal {
    if start.is_zero() {
        return Decimal::ZERO;
    }
    (end - start)
        .checked_div(start)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Mutable state of one candidate's forward pass
struct TrackingState {
    peak_price: Decimal,
    peak_date: NaiveDate,
    days_without_high: u32,
    drawdowns: Vec<Drawdown>,
    continuation: bool,
    new_lod_after_drawdown: Option<Decimal>,
}

impl TrackingState {
    fn new(start: &DailyBar) -> Self {
        Self {
            peak_price: start.low,
            peak_date: start.date,
            days_without_high: 0,
            drawdowns: Vec::new(),
            continuation: false,
            new_lod_after_drawdown: None,
        }
    }

    fn push_drawdown(&mut self, bar: &DailyBar, drawdown: Decimal) {
        self.drawdowns.push(Drawdown {
            date: bar.date,
            drawdown,
            price: bar.close,
        });
    }

    fn latch_continuation(&mut self) {
        self.continuation = true;
        self.new_lod_after_drawdown = self.drawdowns.iter().map(|d| d.price).min();
    }
}

/// Detects growth moves in a single ticker's history
///
/// Stateless between calls: every method is a pure function of its input bars
/// and the configuration, so one detector can be shared across tickers.
#[derive(Debug, Clone)]
pub struct MoveDetector {
    config: DetectionConfig,
}

impl MoveDetector {
    /// Create a new detector with the given configuration
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Create a detector with default configuration
    pub fn with_defaults() -> Self {
        Self::new(DetectionConfig::default())
    }

    /// Get the detection configuration
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Find days whose low is followed by enough growth inside the lookahead window
    ///
    /// The last `growth_move_days` bars never qualify since their window is incomplete.
    pub fn find_candidates(&self, bars: &[DailyBar]) -> Vec<LodCandidate> {
        let window = self.config.growth_move_days;
        if window == 0 || bars.len() <= window {
            return Vec::new();
        }

        (0..bars.len() - window)
            .filter_map(|i| {
                let bar = &bars[i];
                let best_high = bars[i + 1..=i + window].iter().map(|b| b.high).max()?;
                let growth = percentage_change(bar.low, best_high);

                (growth >= self.config.min_growth_percentage).then(|| LodCandidate {
                    date: bar.date,
                    low: bar.low,
                    index: i,
                    growth,
                })
            })
            .collect()
    }

    /// Track a move starting at the low of `bars[start_index]`
    ///
    /// Returns None when there is nothing after the start bar or when the peak
    /// never rose above the start price.
    pub fn track_move(&self, bars: &[DailyBar], start_index: usize) -> Option<TrackedMove> {
        if start_index + 1 >= bars.len() {
            return None;
        }

        let start = &bars[start_index];
        let lod_price = start.low;
        let mut state = TrackingState::new(start);
        let mut termination_reason = None;

        tracing::debug!(start_date = %start.date, lod = %lod_price, "Starting move analysis");

        for bar in &bars[start_index + 1..] {
            if let Some(reason) = self.advance(&mut state, start, bar) {
                tracing::debug!(date = %bar.date, reason = %reason, "Move terminated");
                termination_reason = Some(reason);
                break;
            }
        }

        if state.peak_price <= lod_price {
            return None;
        }

        let growth_percentage = percentage_change(lod_price, state.peak_price);
        let duration_days = (state.peak_date - start.date).num_days();
        let superperformance = self.classify(growth_percentage, duration_days);

        tracing::debug!(
            growth_pct = %growth_percentage.round_dp(1),
            duration_days,
            drawdowns = state.drawdowns.len(),
            continuation = state.continuation,
            classification = %superperformance,
            "Move completed"
        );

        Some(TrackedMove {
            start_date: start.date,
            end_date: state.peak_date,
            start_price: lod_price,
            peak_price: state.peak_price,
            growth_percentage,
            duration_days,
            drawdowns: state.drawdowns,
            continuation: state.continuation,
            superperformance,
            new_lod_after_drawdown: state.new_lod_after_drawdown,
            termination_reason,
        })
    }

    /// Apply one day to the tracking state, returning a reason if the move ends here
    fn advance(
        &self,
        state: &mut TrackingState,
        start: &DailyBar,
        bar: &DailyBar,
    ) -> Option<TerminationReason> {
        let cfg = &self.config;

        if (bar.date - start.date).num_days() > cfg.max_total_days {
            return Some(TerminationReason::MaxTotalDaysExceeded);
        }

        let prior_peak = (state.peak_price, state.peak_date);
        if bar.high > state.peak_price {
            state.peak_price = bar.high;
            state.peak_date = bar.date;
            state.days_without_high = 0;
            tracing::trace!(peak = %bar.high, date = %bar.date, "New peak");
        } else {
            state.days_without_high += 1;
        }

        // Peak to close, so an intraday dip that recovers by the close is not a drawdown
        let current_drawdown = -percentage_change(state.peak_price, bar.close);

        if bar.low < start.low {
            return Some(TerminationReason::BelowLod);
        }

        let in_band = current_drawdown >= cfg.min_drawdown_percentage
            && current_drawdown < cfg.max_drawdown_percentage;
        let apart_from_last = state
            .drawdowns
            .last()
            .map_or(true, |last| (bar.date - last.date).num_days() > 1);
        if in_band && apart_from_last {
            state.push_drawdown(bar, current_drawdown);
            tracing::debug!(drawdown_pct = %current_drawdown.round_dp(1), date = %bar.date, "Drawdown detected");
        }

        self.check_continuation(state, bar, prior_peak, current_drawdown);

        if current_drawdown >= cfg.max_drawdown_percentage {
            if !state.drawdowns.iter().any(|d| d.date == bar.date) {
                state.push_drawdown(bar, current_drawdown);
                tracing::debug!(drawdown_pct = %current_drawdown.round_dp(1), date = %bar.date, "Major drawdown recorded");
            }
            if state.days_without_high >= cfg.max_days_without_high {
                return Some(TerminationReason::DrawdownWithoutNewHigh {
                    days: cfg.max_days_without_high,
                    drawdown_pct: current_drawdown,
                });
            }
        }

        // Skipped while inside the drawdown band: the move may still recover.
        // The counter hits the limit on the limit-th day without a high, so the
        // default of 30 ends a stalled move on its 30th day, not the 31st.
        if state.days_without_high >= cfg.max_days_without_high
            && current_drawdown < cfg.min_drawdown_percentage
        {
            return Some(TerminationReason::NoNewHigh {
                days: cfg.max_days_without_high,
                drawdown_pct: current_drawdown,
            });
        }

        None
    }

    /// Latch continuation once price resumes after a recorded drawdown
    ///
    /// Two independent signals: a new high within the continuation window of the
    /// previous peak, or a close back above the last drawdown's close shortly after it.
    fn check_continuation(
        &self,
        state: &mut TrackingState,
        bar: &DailyBar,
        prior_peak: (Decimal, NaiveDate),
        current_drawdown: Decimal,
    ) {
        if state.continuation || state.drawdowns.is_empty() {
            return;
        }

        let cfg = &self.config;
        let (prior_peak_price, prior_peak_date) = prior_peak;

        // A drawdown recorded today has not been recovered from yet
        let drawdown_before_today = state.drawdowns.iter().any(|d| d.date < bar.date);
        if drawdown_before_today
            && (bar.date - prior_peak_date).num_days() <= cfg.continuation_window_days
            && bar.high > prior_peak_price
        {
            state.latch_continuation();
            tracing::debug!(high = %bar.high, prior_peak = %prior_peak_price, date = %bar.date, "Continuation: new high");
            return;
        }

        let days_since_peak = (bar.date - state.peak_date).num_days();
        if days_since_peak > cfg.continuation_window_days
            || current_drawdown >= cfg.min_drawdown_percentage
        {
            return;
        }

        if let Some(last) = state.drawdowns.last() {
            let days_since_drawdown = (bar.date - last.date).num_days();
            if days_since_drawdown <= cfg.recovery_window_days && bar.close > last.price {
                state.latch_continuation();
                tracing::debug!(close = %bar.close, date = %bar.date, "Continuation: recovery from drawdown");
            }
        }
    }

    /// Classify a move by growth and duration
    pub fn classify(&self, growth_percentage: Decimal, duration_days: i64) -> Performance {
        classify(
            growth_percentage,
            duration_days,
            &self.config.growth_thresholds,
        )
    }

    /// Find every growth move in one ticker's history
    ///
    /// Bars are sorted by date first. Candidates closer than `candidate_spacing`
    /// bars to a candidate that already produced a move are skipped. The result
    /// still contains unclassified moves; see [`filter_valid_moves`](Self::filter_valid_moves).
    pub fn analyze_ticker(&self, ticker: &str, bars: &[DailyBar]) -> Vec<Move> {
        if bars.len() < self.config.growth_move_days + 1 {
            return Vec::new();
        }

        let bars: Cow<'_, [DailyBar]> = if bars.windows(2).all(|w| w[0].date <= w[1].date) {
            Cow::Borrowed(bars)
        } else {
            let mut sorted = bars.to_vec();
            sorted.sort_by_key(|b| b.date);
            Cow::Owned(sorted)
        };

        let candidates = self.find_candidates(&bars);
        let mut tracked: HashSet<usize> = HashSet::new();
        let mut moves = Vec::new();

        for candidate in &candidates {
            let near_tracked = tracked
                .iter()
                .any(|&idx| candidate.index.abs_diff(idx) < self.config.candidate_spacing);
            if near_tracked {
                continue;
            }

            if let Some(tracked_move) = self.track_move(&bars, candidate.index) {
                moves.push(tracked_move.into_move(ticker));
                tracked.insert(candidate.index);
            }
        }

        tracing::debug!(
            ticker,
            bars = bars.len(),
            candidates = candidates.len(),
            moves = moves.len(),
            "Ticker analyzed"
        );

        moves
    }

    /// Keep only Growth and Superperformance moves, preserving order
    pub fn filter_valid_moves(moves: Vec<Move>) -> Vec<Move> {
        moves.into_iter().filter(|m| m.is_valid()).collect()
    }

    /// Track one candidate and log a readable summary of the result
    pub fn debug_move_analysis(
        &self,
        ticker: &str,
        bars: &[DailyBar],
        start_index: usize,
    ) -> Option<TrackedMove> {
        let Some(start) = bars.get(start_index).filter(|_| start_index + 1 < bars.len()) else {
            tracing::warn!(ticker, start_index, bars = bars.len(), "Invalid start index");
            return None;
        };

        tracing::info!(ticker, lod_date = %start.date, lod_price = %start.low, "Analyzing move");

        let result = self.track_move(bars, start_index);
        match &result {
            Some(tracked) => {
                let drawdown_dates: Vec<String> =
                    tracked.drawdowns.iter().map(|d| d.date.to_string()).collect();
                tracing::info!(
                    ticker,
                    growth_pct = %tracked.growth_percentage.round_dp(1),
                    duration_days = tracked.duration_days,
                    drawdowns = tracked.drawdowns.len(),
                    drawdown_dates = ?drawdown_dates,
                    continuation = tracked.continuation,
                    classification = %tracked.superperformance,
                    termination = ?tracked.termination_reason.as_ref().map(|r| r.to_string()),
                    "Move found"
                );
            }
            None => tracing::warn!(ticker, start_index, "No valid move found"),
        }

        result
    }
}
