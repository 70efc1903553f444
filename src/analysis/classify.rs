//! Duration-banded growth classification

use rust_decimal::Decimal;

use super::types::Performance;
use crate::config::GrowthThresholds;

/// Shortest move (calendar days) that can qualify
pub const MIN_CLASSIFIED_DAYS: i64 = 64;
/// Upper bound of the short band
pub const SHORT_BAND_MAX_DAYS: i64 = 252;
/// Longest move (calendar days) that can qualify
pub const MAX_CLASSIFIED_DAYS: i64 = 504;

/// Classify a move by its growth and start-to-peak duration
///
/// Superperformance wins over Growth when both thresholds are met.
pub fn classify(
    growth_percentage: Decimal,
    duration_days: i64,
    thresholds: &GrowthThresholds,
) -> Performance {
    let (super_threshold, growth_threshold) = match duration_days {
        MIN_CLASSIFIED_DAYS..=SHORT_BAND_MAX_DAYS => {
            (thresholds.super_64_252, thresholds.growth_64_252)
        }
        d if d > SHORT_BAND_MAX_DAYS && d <= MAX_CLASSIFIED_DAYS => {
            (thresholds.super_252_504, thresholds.growth_252_504)
        }
        _ => return Performance::None,
    };

    if growth_percentage >= super_threshold {
        Performance::Superperformance
    } else if growth_percentage >= growth_threshold {
        Performance::Growth
    } else {
        Performance::None
    }
}
