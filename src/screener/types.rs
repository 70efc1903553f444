//! Screener types

use crate::data::DataError;
use thiserror::Error;

/// Screener errors
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// Nothing to scan
    #[error("Universe is empty")]
    EmptyUniverse,
    /// History could not be fetched for one ticker
    #[error("Failed to fetch {ticker}: {source}")]
    Fetch {
        ticker: String,
        #[source]
        source: DataError,
    },
    /// Ticker discovery failed
    #[error("Universe discovery failed: {0}")]
    Discovery(#[from] DataError),
}
