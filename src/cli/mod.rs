//! CLI interface for superperformance-screener
//!
//! Provides subcommands for:
//! - `scan`: Run the screener over the ticker universe
//! - `analyze`: Inspect a single ticker's moves
//! - `config`: Show effective configuration

mod analyze;
mod scan;

pub use analyze::AnalyzeArgs;
pub use scan::ScanArgs;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "superperformance-screener")]
#[command(about = "Screen daily price history for growth and superperformance moves")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the screener over the ticker universe
    Scan(ScanArgs),
    /// Inspect a single ticker's moves
    Analyze(AnalyzeArgs),
    /// Show effective configuration
    Config,
}

/// How moves are printed to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
