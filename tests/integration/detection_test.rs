//! Integration tests for growth move detection

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use superperformance_screener::analysis::{
    format_output_row, percentage_change, DailyBar, MoveDetector, Performance, TerminationReason,
};

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
}

fn bar(offset: i64, high: Decimal, low: Decimal, close: Decimal) -> DailyBar {
    DailyBar::new(day(offset), close, high, low, close)
}

/// Low of 100 on day 0, then highs climbing one point a day
fn ramp(days: i64) -> Vec<DailyBar> {
    let mut bars = vec![bar(0, dec!(101), dec!(100), dec!(100.5))];
    for i in 1..=days {
        let high = dec!(100) + Decimal::from(i);
        bars.push(bar(i, high, high - dec!(0.5), high - dec!(0.2)));
    }
    bars
}

#[test]
fn test_percentage_change_identities() {
    assert_eq!(percentage_change(dec!(50), dec!(50)), Decimal::ZERO);
    assert_eq!(percentage_change(dec!(50), dec!(75)), dec!(50));
    assert_eq!(percentage_change(dec!(0), dec!(75)), Decimal::ZERO);
}

#[test]
fn test_steady_ramp_produces_spaced_moves() {
    let detector = MoveDetector::with_defaults();
    let bars = ramp(100);

    let moves = detector.analyze_ticker("RAMP", &bars);
    let starts: Vec<NaiveDate> = moves.iter().map(|m| m.start_date).collect();
    assert_eq!(starts, vec![day(0), day(5), day(10)]);

    let first = &moves[0];
    assert_eq!(first.end_date, day(100));
    assert_eq!(first.peak_price, dec!(200));
    assert_eq!(first.growth_percentage, dec!(100));
    assert_eq!(first.duration_days, 100);
    assert_eq!(first.superperformance, Performance::Superperformance);
    assert!(first.drawdowns.is_empty());
    assert!(!first.continuation);
    assert!(first.termination_reason.is_none());

    assert_eq!(moves[1].superperformance, Performance::Growth);
    assert_eq!(moves[2].superperformance, Performance::Growth);
    assert!(moves.iter().all(|m| m.peak_price > m.start_price));
}

#[test]
fn test_lod_breach_terminates() {
    let detector = MoveDetector::with_defaults();
    let mut bars = ramp(50);
    bars.push(bar(51, dec!(140), dec!(99), dec!(99.5)));
    bars.extend((52..60).map(|i| bar(i, dec!(160), dec!(150), dec!(155))));

    let tracked = detector.track_move(&bars, 0).unwrap();
    assert_eq!(tracked.termination_reason, Some(TerminationReason::BelowLod));
    assert_eq!(tracked.end_date, day(50));
    assert_eq!(tracked.peak_price, dec!(150));
    assert!(tracked.drawdowns.is_empty());
    assert_eq!(tracked.superperformance, Performance::None);
}

#[test]
fn test_stagnation_terminates_without_new_high() {
    let detector = MoveDetector::with_defaults();
    let mut bars = ramp(40);
    bars.extend((41..=80).map(|i| bar(i, dec!(139), dec!(138), dec!(138.5))));

    let tracked = detector.track_move(&bars, 0).unwrap();
    assert_eq!(tracked.end_date, day(40));
    assert_eq!(tracked.duration_days, 40);
    match tracked.termination_reason {
        Some(TerminationReason::NoNewHigh { days, .. }) => assert_eq!(days, 30),
        other => panic!("unexpected termination: {:?}", other),
    }
}

#[test]
fn test_unsorted_input_matches_sorted() {
    let detector = MoveDetector::with_defaults();
    let bars = ramp(100);
    let mut shuffled = bars.clone();
    shuffled.reverse();

    assert_eq!(
        detector.analyze_ticker("RAMP", &shuffled),
        detector.analyze_ticker("RAMP", &bars)
    );
}

#[test]
fn test_insufficient_data() {
    let detector = MoveDetector::with_defaults();
    assert!(detector.analyze_ticker("NEW", &ramp(4)).is_empty());
    assert!(detector.analyze_ticker("NEW", &[]).is_empty());
}

#[test]
fn test_analysis_is_idempotent() {
    let detector = MoveDetector::with_defaults();
    let bars = ramp(100);
    assert_eq!(
        detector.analyze_ticker("RAMP", &bars),
        detector.analyze_ticker("RAMP", &bars)
    );
}

#[test]
fn test_valid_moves_render_rows() {
    let detector = MoveDetector::with_defaults();
    let moves = MoveDetector::filter_valid_moves(detector.analyze_ticker("RAMP", &ramp(100)));
    assert_eq!(moves.len(), 3);

    let row = format_output_row(&moves[0]);
    assert_eq!(
        row,
        [
            "RAMP".to_string(),
            "Jan 01, 2020".to_string(),
            "Apr 10, 2020".to_string(),
            "Yes".to_string(),
            "none".to_string(),
            "No".to_string(),
        ]
    );
}
