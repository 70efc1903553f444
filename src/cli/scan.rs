//! Scan command implementation

use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use super::OutputFormat;
use crate::analysis::MoveDetector;
use crate::config::Config;
use crate::data::BarStore;
use crate::output::{export_results, render_moves_json, render_moves_table, save_results_backup};
use crate::screener::{consolidate_overlapping_moves, Screener, Universe};

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory of per-ticker Parquet bar files (overrides config)
    #[arg(long)]
    pub bars_dir: Option<PathBuf>,

    /// Output directory for results (overrides config)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Only scan these tickers (repeatable)
    #[arg(long = "ticker")]
    pub tickers: Vec<String>,

    /// First date of history (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last date of history (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Report every move instead of merging overlapping ones
    #[arg(long)]
    pub no_consolidate: bool,

    /// Skip the Parquet export
    #[arg(long)]
    pub no_export: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut screener_config = config.screener.clone();
        if let Some(start) = self.start {
            screener_config.start_date = start;
        }
        if self.end.is_some() {
            screener_config.end_date = self.end;
        }

        let bars_dir = self
            .bars_dir
            .clone()
            .unwrap_or_else(|| config.data.bars_dir.clone());
        let output_dir = self
            .output
            .clone()
            .unwrap_or_else(|| config.data.output_dir.clone());

        let store = BarStore::new(bars_dir);
        let mut universe = Universe::discover(&config.universe, &store).await?;
        if !self.tickers.is_empty() {
            universe = universe.restrict_to(&self.tickers);
        }

        let detector = MoveDetector::new(config.detection.clone());
        let screener = Screener::new(store, detector, screener_config);
        let interrupt = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "Could not listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };
        let report = screener.run_until(&universe, interrupt).await?;

        // backup keeps every qualifying move; consolidation only shapes what is shown
        if let Err(e) = save_results_backup(&output_dir, &report.moves, report.started_at) {
            tracing::warn!(error = %e, dir = %output_dir.display(), "Could not save backup");
        }

        let moves = if self.no_consolidate {
            report.moves.clone()
        } else {
            consolidate_overlapping_moves(report.moves.clone())
        };

        if !self.no_export {
            export_results(&output_dir, &moves, report.started_at)?;
        }

        match self.format {
            OutputFormat::Table => {
                print!("{}", render_moves_table(&moves));
                println!("{}", report.format_table());
            }
            OutputFormat::Json => print!("{}", render_moves_json(&moves)?),
        }

        Ok(())
    }
}
