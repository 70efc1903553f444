//! Integration tests for the screener over a Parquet bar store

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use superperformance_screener::analysis::{DailyBar, MoveDetector, Performance};
use superperformance_screener::config::ScreenerConfig;
use superperformance_screener::data::{BarSource, BarStore};
use superperformance_screener::output::{load_results_backup, save_results_backup};
use superperformance_screener::screener::{
    consolidate_overlapping_moves, Listing, Screener, Universe, UNKNOWN_EXCHANGE,
};
use tempfile::TempDir;

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
}

fn ramp(days: i64, volume: u64) -> Vec<DailyBar> {
    let mut bars = vec![DailyBar::new(day(0), dec!(100.5), dec!(101), dec!(100), dec!(100.5))
        .with_volume(volume)];
    for i in 1..=days {
        let high = dec!(100) + Decimal::from(i);
        let close = high - dec!(0.2);
        bars.push(DailyBar::new(day(i), close, high, high - dec!(0.5), close).with_volume(volume));
    }
    bars
}

fn flat(days: i64, volume: u64) -> Vec<DailyBar> {
    (0..days)
        .map(|i| DailyBar::new(day(i), dec!(10), dec!(10.1), dec!(9.9), dec!(10)).with_volume(volume))
        .collect()
}

fn screener_config() -> ScreenerConfig {
    ScreenerConfig {
        start_date: day(0),
        end_date: Some(day(1000)),
        progress_interval: 1,
        ..ScreenerConfig::default()
    }
}

fn seeded_store(dir: &TempDir) -> BarStore {
    let store = BarStore::new(dir.path());
    store.write_bars("RUN", &ramp(100, 1_000_000)).unwrap();
    store.write_bars("THIN", &ramp(100, 50)).unwrap();
    store.write_bars("FLAT", &flat(60, 1_000_000)).unwrap();
    store
}

#[tokio::test]
async fn test_bar_store_serves_window() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    assert_eq!(store.list_tickers().unwrap(), vec!["FLAT", "RUN", "THIN"]);

    let bars = store.fetch_bars("RUN", day(10), day(19)).await.unwrap();
    assert_eq!(bars.len(), 10);
    assert_eq!(bars[0].date, day(10));
    assert_eq!(bars[0].high, dec!(110));
    assert_eq!(bars[0].volume, 1_000_000);

    assert!(store.fetch_bars("NONE", day(0), day(1)).await.is_err());
}

#[tokio::test]
async fn test_scan_discovered_universe() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    let universe = Universe::discover(&[], &store).await.unwrap();
    assert_eq!(universe.len(), 3);
    assert_eq!(universe.exchange_counts()[UNKNOWN_EXCHANGE], 3);

    let screener = Screener::new(store, MoveDetector::with_defaults(), screener_config());
    let report = screener.run(&universe).await.unwrap();

    assert_eq!(report.tickers_total, 3);
    assert_eq!(report.tickers_analyzed, 2);
    assert_eq!(report.tickers_low_volume, 1);
    assert_eq!(report.tickers_failed, 0);
    assert_eq!(report.moves.len(), 3);
    assert!(report.moves.iter().all(|m| m.ticker == "RUN" && m.is_valid()));
    assert!(report
        .moves
        .iter()
        .all(|m| m.exchange.as_deref() == Some(UNKNOWN_EXCHANGE)));

    let consolidated = consolidate_overlapping_moves(report.moves.clone());
    assert_eq!(consolidated.len(), 1);
    assert_eq!(consolidated[0].start_date, day(0));
    assert_eq!(consolidated[0].superperformance, Performance::Superperformance);
}

#[tokio::test]
async fn test_scan_configured_universe_with_missing_ticker() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);

    let configured = vec![
        Listing::new("RUN", "NASDAQ"),
        Listing::new("DELISTED", "NYSE"),
    ];
    let universe = Universe::discover(&configured, &store).await.unwrap();

    let screener = Screener::new(store, MoveDetector::with_defaults(), screener_config());
    let report = screener.run(&universe).await.unwrap();

    assert_eq!(report.tickers_failed, 1);
    assert_eq!(report.tickers_analyzed, 1);
    assert!(report
        .moves
        .iter()
        .all(|m| m.exchange.as_deref() == Some("NASDAQ")));
}

#[tokio::test]
async fn test_backup_after_scan() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);
    let universe = Universe::new(vec![Listing::new("RUN", "NASDAQ")]);

    let screener = Screener::new(store, MoveDetector::with_defaults(), screener_config());
    let report = screener.run(&universe).await.unwrap();

    let out = dir.path().join("out");
    let path = save_results_backup(&out, &report.moves, report.started_at).unwrap();
    let restored = load_results_backup(&path).unwrap();
    assert_eq!(restored, report.moves);
}
