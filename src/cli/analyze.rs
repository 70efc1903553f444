//! Analyze command implementation

use chrono::{NaiveDate, Utc};
use clap::Args;
use std::path::PathBuf;

use super::OutputFormat;
use crate::analysis::MoveDetector;
use crate::config::Config;
use crate::data::{BarSource, BarStore};
use crate::output::{render_moves_json, render_moves_table};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Ticker to analyze
    pub ticker: String,

    /// Trace a single candidate starting at this bar index
    #[arg(long)]
    pub index: Option<usize>,

    /// Include moves that do not qualify
    #[arg(long)]
    pub all: bool,

    /// Directory of per-ticker Parquet bar files (overrides config)
    #[arg(long)]
    pub bars_dir: Option<PathBuf>,

    /// First date of history (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last date of history (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl AnalyzeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let bars_dir = self
            .bars_dir
            .clone()
            .unwrap_or_else(|| config.data.bars_dir.clone());
        let start = self.start.unwrap_or(config.screener.start_date);
        let end = self
            .end
            .or(config.screener.end_date)
            .unwrap_or_else(|| Utc::now().date_naive());

        let store = BarStore::new(bars_dir);
        let mut bars = store.fetch_bars(&self.ticker, start, end).await?;
        bars.sort_by_key(|b| b.date);
        tracing::info!(ticker = %self.ticker, bars = bars.len(), %start, %end, "Loaded history");

        let detector = MoveDetector::new(config.detection.clone());

        if let Some(index) = self.index {
            match detector.debug_move_analysis(&self.ticker, &bars, index) {
                Some(tracked) => println!("{}", serde_json::to_string_pretty(&tracked)?),
                None => println!("No move tracked from index {}", index),
            }
            return Ok(());
        }

        let moves = detector.analyze_ticker(&self.ticker, &bars);
        let moves = if self.all {
            moves
        } else {
            MoveDetector::filter_valid_moves(moves)
        };

        match self.format {
            OutputFormat::Table => print!("{}", render_moves_table(&moves)),
            OutputFormat::Json => print!("{}", render_moves_json(&moves)?),
        }

        Ok(())
    }
}
