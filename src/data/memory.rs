//! In-memory bar source

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

use super::{in_window, BarSource, DataError};
use crate::analysis::DailyBar;

/// Bars held in memory, keyed by ticker
#[derive(Debug, Clone, Default)]
pub struct MemoryBarSource {
    bars: HashMap<String, Vec<DailyBar>>,
}

impl MemoryBarSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a ticker's history
    pub fn insert(&mut self, ticker: impl Into<String>, bars: Vec<DailyBar>) {
        self.bars.insert(ticker.into(), bars);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_ticker(mut self, ticker: impl Into<String>, bars: Vec<DailyBar>) -> Self {
        self.insert(ticker, bars);
        self
    }
}

#[async_trait]
impl BarSource for MemoryBarSource {
    async fn fetch_bars(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, DataError> {
        let bars = self
            .bars
            .get(ticker)
            .ok_or_else(|| DataError::NotFound(ticker.to_string()))?;
        Ok(bars
            .iter()
            .filter(|b| in_window(b, start, end))
            .cloned()
            .collect())
    }

    async fn list_tickers(&self) -> Result<Vec<String>, DataError> {
        let mut tickers: Vec<String> = self.bars.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }
}
