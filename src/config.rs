//! Configuration types for superperformance-screener

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::screener::Listing;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub screener: ScreenerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Explicit ticker universe; discovered from the bar store when empty
    #[serde(default)]
    pub universe: Vec<Listing>,
}

/// Growth move detection thresholds
///
/// Percentages are expressed in percent (5 = 5%), day counts in calendar days
/// except `growth_move_days` and `candidate_spacing`, which count bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Minimum rise inside the lookahead window for a day to become a candidate
    #[serde(default = "default_min_growth_percentage")]
    pub min_growth_percentage: Decimal,

    /// Drawdowns at or beyond this are "major" and may end the move
    #[serde(default = "default_max_drawdown_percentage")]
    pub max_drawdown_percentage: Decimal,

    /// Smallest decline from the peak recorded as a drawdown
    #[serde(default = "default_min_drawdown_percentage")]
    pub min_drawdown_percentage: Decimal,

    /// Lookahead window (bars) for the candidate scan
    #[serde(default = "default_growth_move_days")]
    pub growth_move_days: usize,

    /// Days without a new high before a move may terminate
    #[serde(default = "default_max_days_without_high")]
    pub max_days_without_high: u32,

    /// Hard cap on calendar days tracked from the start
    #[serde(default = "default_max_total_days")]
    pub max_total_days: i64,

    /// Calendar days after a peak in which a new high counts as continuation
    #[serde(default = "default_continuation_window_days")]
    pub continuation_window_days: i64,

    /// Calendar days after a drawdown in which a close above it counts as recovery
    #[serde(default = "default_recovery_window_days")]
    pub recovery_window_days: i64,

    /// Candidates closer than this many bars to an already tracked move are skipped
    #[serde(default = "default_candidate_spacing")]
    pub candidate_spacing: usize,

    #[serde(default)]
    pub growth_thresholds: GrowthThresholds,
}

fn default_min_growth_percentage() -> Decimal {
    Decimal::new(5, 0)
}
fn default_max_drawdown_percentage() -> Decimal {
    Decimal::new(30, 0)
}
fn default_min_drawdown_percentage() -> Decimal {
    Decimal::new(15, 0)
}
fn default_growth_move_days() -> usize {
    5
}
fn default_max_days_without_high() -> u32 {
    30
}
fn default_max_total_days() -> i64 {
    504
}
fn default_continuation_window_days() -> i64 {
    90
}
fn default_recovery_window_days() -> i64 {
    30
}
fn default_candidate_spacing() -> usize {
    5
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_growth_percentage: default_min_growth_percentage(),
            max_drawdown_percentage: default_max_drawdown_percentage(),
            min_drawdown_percentage: default_min_drawdown_percentage(),
            growth_move_days: default_growth_move_days(),
            max_days_without_high: default_max_days_without_high(),
            max_total_days: default_max_total_days(),
            continuation_window_days: default_continuation_window_days(),
            recovery_window_days: default_recovery_window_days(),
            candidate_spacing: default_candidate_spacing(),
            growth_thresholds: GrowthThresholds::default(),
        }
    }
}

/// Growth percentage thresholds per duration band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthThresholds {
    /// Superperformance, 64-252 days
    #[serde(default = "default_super_64_252")]
    pub super_64_252: Decimal,
    /// Growth, 64-252 days
    #[serde(default = "default_growth_64_252")]
    pub growth_64_252: Decimal,
    /// Superperformance, 253-504 days
    #[serde(default = "default_super_252_504")]
    pub super_252_504: Decimal,
    /// Growth, 253-504 days
    #[serde(default = "default_growth_252_504")]
    pub growth_252_504: Decimal,
}

fn default_super_64_252() -> Decimal {
    Decimal::new(100, 0)
}
fn default_growth_64_252() -> Decimal {
    Decimal::new(50, 0)
}
fn default_super_252_504() -> Decimal {
    Decimal::new(200, 0)
}
fn default_growth_252_504() -> Decimal {
    Decimal::new(100, 0)
}

impl Default for GrowthThresholds {
    fn default() -> Self {
        Self {
            super_64_252: default_super_64_252(),
            growth_64_252: default_growth_64_252(),
            super_252_504: default_super_252_504(),
            growth_252_504: default_growth_252_504(),
        }
    }
}

/// Screener run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Tickers averaging fewer shares per day are skipped
    #[serde(default = "default_min_avg_volume")]
    pub min_avg_volume: u64,

    /// Trailing bars used for the average volume
    #[serde(default = "default_volume_lookback_days")]
    pub volume_lookback_days: usize,

    /// Tickers analyzed concurrently
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Log a progress line every N tickers
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,

    /// First date of history requested per ticker
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Last date of history requested (today when unset)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

fn default_min_avg_volume() -> u64 {
    200_000
}
fn default_volume_lookback_days() -> usize {
    50
}
fn default_concurrency() -> usize {
    4
}
fn default_progress_interval() -> usize {
    10
}
fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default()
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            min_avg_volume: default_min_avg_volume(),
            volume_lookback_days: default_volume_lookback_days(),
            concurrency: default_concurrency(),
            progress_interval: default_progress_interval(),
            start_date: default_start_date(),
            end_date: None,
        }
    }
}

/// Storage locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory of per-ticker Parquet bar files
    #[serde(default = "default_bars_dir")]
    pub bars_dir: PathBuf,
    /// Directory for JSON backups and result exports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_bars_dir() -> PathBuf {
    PathBuf::from("./data/bars")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            bars_dir: default_bars_dir(),
            output_dir: default_output_dir(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; exporter disabled when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
