//! End-to-end integration tests

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use superperformance_screener::analysis::DailyBar;
use superperformance_screener::cli::{OutputFormat, ScanArgs};
use superperformance_screener::config::Config;
use superperformance_screener::data::BarStore;
use superperformance_screener::output::{load_results_backup, RESULTS_PREFIX};
use tempfile::TempDir;

#[test]
fn test_config_example_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).unwrap();

    assert_eq!(config.detection.min_growth_percentage, dec!(5));
    assert_eq!(config.detection.growth_thresholds.super_252_504, dec!(200));
    assert_eq!(config.screener.min_avg_volume, 200_000);
    assert_eq!(config.universe.len(), 3);
}

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
}

fn ramp(days: i64) -> Vec<DailyBar> {
    let mut bars =
        vec![DailyBar::new(day(0), dec!(100.5), dec!(101), dec!(100), dec!(100.5)).with_volume(900_000)];
    for i in 1..=days {
        let high = dec!(100) + Decimal::from(i);
        let close = high - dec!(0.2);
        bars.push(DailyBar::new(day(i), close, high, high - dec!(0.5), close).with_volume(900_000));
    }
    bars
}

#[tokio::test]
async fn test_scan_command_writes_results() {
    let dir = TempDir::new().unwrap();
    let bars_dir = dir.path().join("bars");
    let output_dir = dir.path().join("out");
    BarStore::new(&bars_dir).write_bars("RUN", &ramp(120)).unwrap();

    let mut config = Config::default();
    config.screener.start_date = day(0);
    config.screener.end_date = Some(day(365));

    let args = ScanArgs {
        bars_dir: Some(bars_dir),
        output: Some(output_dir.clone()),
        tickers: vec![],
        start: None,
        end: None,
        no_consolidate: false,
        no_export: false,
        format: OutputFormat::Json,
    };
    args.execute(&config).await.unwrap();

    let mut files: Vec<String> = std::fs::read_dir(&output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();

    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.starts_with(RESULTS_PREFIX)));
    assert!(files[0].ends_with(".json"));
    assert!(files[1].ends_with(".parquet"));

    let backup = load_results_backup(&output_dir.join(&files[0])).unwrap();
    assert!(!backup.is_empty());
    assert!(backup.iter().all(|m| m.ticker == "RUN" && m.is_valid()));
}

#[tokio::test]
async fn test_scan_command_survives_backup_failure() {
    let dir = TempDir::new().unwrap();
    let bars_dir = dir.path().join("bars");
    BarStore::new(&bars_dir).write_bars("RUN", &ramp(120)).unwrap();

    // A plain file where the output directory should be
    let blocked = dir.path().join("out");
    std::fs::write(&blocked, "not a directory").unwrap();

    let mut config = Config::default();
    config.screener.start_date = day(0);
    config.screener.end_date = Some(day(365));

    let args = ScanArgs {
        bars_dir: Some(bars_dir),
        output: Some(blocked.clone()),
        tickers: vec![],
        start: None,
        end: None,
        no_consolidate: false,
        no_export: true,
        format: OutputFormat::Table,
    };
    args.execute(&config).await.unwrap();

    assert!(blocked.is_file());
}
