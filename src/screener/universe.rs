//! Ticker universe

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::types::ScreenerError;
use crate::data::BarSource;

/// Exchange recorded for tickers found only in the bar store
pub const UNKNOWN_EXCHANGE: &str = "UNKNOWN";

/// A ticker and the exchange it trades on
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Listing {
    pub ticker: String,
    pub exchange: String,
}

impl Listing {
    pub fn new(ticker: impl Into<String>, exchange: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            exchange: exchange.into(),
        }
    }
}

/// Deduplicated listings, sorted by ticker
#[derive(Debug, Clone, Default)]
pub struct Universe {
    listings: Vec<Listing>,
}

impl Universe {
    /// Build from listings, dropping exact duplicates
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        let unique: BTreeSet<Listing> = listings.into_iter().collect();
        Self {
            listings: unique.into_iter().collect(),
        }
    }

    /// Use the configured listings, or every ticker the source can serve
    pub async fn discover<S>(configured: &[Listing], source: &S) -> Result<Self, ScreenerError>
    where
        S: BarSource + ?Sized,
    {
        let universe = if configured.is_empty() {
            let tickers = source.list_tickers().await?;
            Self::new(
                tickers
                    .into_iter()
                    .map(|t| Listing::new(t, UNKNOWN_EXCHANGE)),
            )
        } else {
            Self::new(configured.iter().cloned())
        };

        tracing::info!(
            total = universe.len(),
            exchanges = ?universe.exchange_counts(),
            "Universe ready"
        );

        Ok(universe)
    }

    /// Keep only the given tickers
    pub fn restrict_to(&self, tickers: &[String]) -> Self {
        Self {
            listings: self
                .listings
                .iter()
                .filter(|l| tickers.iter().any(|t| t.eq_ignore_ascii_case(&l.ticker)))
                .cloned()
                .collect(),
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Number of listings per exchange
    pub fn exchange_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for listing in &self.listings {
            *counts.entry(listing.exchange.clone()).or_insert(0) += 1;
        }
        counts
    }
}
