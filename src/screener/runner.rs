//! Screener run loop
//!
//! Fetches each listing's history, applies the volume filter, runs the move
//! detector and collects qualifying moves. One ticker failing never stops the run.

use chrono::{NaiveDate, Utc};
use futures_util::stream::{self, StreamExt};
use std::future::Future;
use std::time::Instant;

use super::report::ScanReport;
use super::types::ScreenerError;
use super::universe::{Listing, Universe};
use crate::analysis::{DailyBar, Move, MoveDetector};
use crate::config::ScreenerConfig;
use crate::data::BarSource;
use crate::telemetry::{record_analysis_latency, record_count, ScanMetric};

/// What happened to one ticker
#[derive(Debug, Clone, PartialEq)]
pub enum TickerOutcome {
    /// Analyzed; `moves` holds only qualifying moves
    Analyzed { moves: Vec<Move>, avg_volume: u64 },
    /// No bars in the requested window
    NoData,
    /// Average volume below the configured minimum
    LowVolume(u64),
}

/// Mean volume over the last `lookback` bars (all bars when `lookback` is 0)
pub fn average_volume(bars: &[DailyBar], lookback: usize) -> u64 {
    let window = if lookback == 0 || lookback > bars.len() {
        bars
    } else {
        &bars[bars.len() - lookback..]
    };
    if window.is_empty() {
        return 0;
    }
    let total: u128 = window.iter().map(|b| b.volume as u128).sum();
    (total / window.len() as u128) as u64
}

/// Runs the move detector across a universe of tickers
pub struct Screener<S> {
    source: S,
    detector: MoveDetector,
    config: ScreenerConfig,
}

impl<S: BarSource> Screener<S> {
    /// Create a new screener
    pub fn new(source: S, detector: MoveDetector, config: ScreenerConfig) -> Self {
        Self {
            source,
            detector,
            config,
        }
    }

    /// The bar source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Last date of history requested
    fn end_date(&self) -> NaiveDate {
        self.config
            .end_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Fetch, filter and analyze a single listing
    pub async fn scan_ticker(&self, listing: &Listing) -> Result<TickerOutcome, ScreenerError> {
        let mut bars = self
            .source
            .fetch_bars(&listing.ticker, self.config.start_date, self.end_date())
            .await
            .map_err(|source| ScreenerError::Fetch {
                ticker: listing.ticker.clone(),
                source,
            })?;

        if bars.is_empty() {
            return Ok(TickerOutcome::NoData);
        }
        bars.sort_by_key(|b| b.date);

        let avg_volume = average_volume(&bars, self.config.volume_lookback_days);
        if avg_volume < self.config.min_avg_volume {
            return Ok(TickerOutcome::LowVolume(avg_volume));
        }

        let started = Instant::now();
        let moves = self.detector.analyze_ticker(&listing.ticker, &bars);
        let mut valid = MoveDetector::filter_valid_moves(moves);
        record_analysis_latency(started.elapsed());

        for mv in &mut valid {
            mv.exchange = Some(listing.exchange.clone());
            mv.avg_volume = Some(avg_volume);
        }

        Ok(TickerOutcome::Analyzed {
            moves: valid,
            avg_volume,
        })
    }

    /// Scan every listing, keeping universe order in the results
    pub async fn run(&self, universe: &Universe) -> Result<ScanReport, ScreenerError> {
        self.run_until(universe, std::future::pending::<()>()).await
    }

    /// Scan like [`run`](Self::run), stopping early once `cancel` completes
    ///
    /// An interrupted run still returns the outcomes collected so far, with
    /// `interrupted` set on the report.
    pub async fn run_until<F>(
        &self,
        universe: &Universe,
        cancel: F,
    ) -> Result<ScanReport, ScreenerError>
    where
        F: Future<Output = ()>,
    {
        if universe.is_empty() {
            return Err(ScreenerError::EmptyUniverse);
        }

        let total = universe.len();
        let mut report = ScanReport::new(total);
        let progress_interval = self.config.progress_interval.max(1);

        tracing::info!(
            total,
            start = %self.config.start_date,
            end = %self.end_date(),
            min_avg_volume = self.config.min_avg_volume,
            "Starting scan"
        );

        let outcomes = stream::iter(universe.listings())
            .map(|listing| async move { (listing, self.scan_ticker(listing).await) })
            .buffered(self.config.concurrency.max(1));
        tokio::pin!(outcomes);
        tokio::pin!(cancel);

        let mut processed = 0usize;
        loop {
            let next = tokio::select! {
                biased;
                _ = &mut cancel => {
                    report.interrupted = true;
                    tracing::warn!(processed, total, moves = report.moves.len(), "Scan interrupted, keeping partial results");
                    break;
                }
                next = outcomes.next() => next,
            };
            let Some((listing, outcome)) = next else {
                break;
            };

            processed += 1;
            self.log_outcome(listing, &outcome, processed, total);
            report.record(outcome);

            if processed % progress_interval == 0 {
                tracing::info!(
                    processed,
                    total,
                    moves = report.moves.len(),
                    elapsed_secs = report.elapsed_secs(),
                    "Scan progress"
                );
            }
        }

        report.finish();
        tracing::info!(
            analyzed = report.tickers_analyzed,
            failed = report.tickers_failed,
            moves = report.moves.len(),
            interrupted = report.interrupted,
            "Scan complete"
        );

        Ok(report)
    }

    fn log_outcome(
        &self,
        listing: &Listing,
        outcome: &Result<TickerOutcome, ScreenerError>,
        processed: usize,
        total: usize,
    ) {
        let ticker = listing.ticker.as_str();
        let exchange = listing.exchange.as_str();
        match outcome {
            Ok(TickerOutcome::Analyzed { moves, avg_volume }) => {
                record_count(ScanMetric::TickerAnalyzed, 1);
                record_count(ScanMetric::MovesFound, moves.len() as u64);
                tracing::info!(ticker, exchange, processed, total, avg_volume, moves = moves.len(), "Ticker analyzed");
            }
            Ok(TickerOutcome::NoData) => {
                record_count(ScanMetric::TickerNoData, 1);
                tracing::info!(ticker, exchange, processed, total, "No historical data");
            }
            Ok(TickerOutcome::LowVolume(avg_volume)) => {
                record_count(ScanMetric::TickerLowVolume, 1);
                tracing::info!(ticker, exchange, processed, total, avg_volume, "Below volume threshold");
            }
            Err(e) => {
                record_count(ScanMetric::TickerFailed, 1);
                tracing::warn!(ticker, exchange, processed, total, error = %e, "Ticker failed");
            }
        }
    }
}
