//! Historical data module
//!
//! Daily bar storage and the sources the screener pulls history from

mod memory;
mod store;
mod types;

pub use memory::MemoryBarSource;
pub use store::{daily_bar_schema, move_schema, write_moves, BarStore};
pub use types::DataError;

use crate::analysis::DailyBar;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for daily bar providers
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Fetch a ticker's bars with dates in `[start, end]`
    async fn fetch_bars(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, DataError>;

    /// Tickers this source can serve
    async fn list_tickers(&self) -> Result<Vec<String>, DataError>;
}

fn in_window(bar: &DailyBar, start: NaiveDate, end: NaiveDate) -> bool {
    bar.date >= start && bar.date <= end
}

#[async_trait]
impl BarSource for BarStore {
    async fn fetch_bars(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, DataError> {
        let store = self.clone();
        let ticker = ticker.to_string();
        let bars = tokio::task::spawn_blocking(move || store.read_bars(&ticker))
            .await
            .map_err(|e| DataError::Io(std::io::Error::other(e)))??;

        Ok(bars
            .into_iter()
            .filter(|b| in_window(b, start, end))
            .collect())
    }

    async fn list_tickers(&self) -> Result<Vec<String>, DataError> {
        BarStore::list_tickers(self)
    }
}
