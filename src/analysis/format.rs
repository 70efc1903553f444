//! Presentation helpers for move records

use chrono::NaiveDate;

use super::types::Move;

/// Display format for dates, e.g. "Mar 05, 2024"
pub const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y";

/// Input format for raw date strings
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a date for output
pub fn format_day(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Render a raw `YYYY-MM-DD` string for output
///
/// Unparseable input comes back unchanged.
pub fn format_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT) {
        Ok(date) => format_day(date),
        Err(_) => raw.to_string(),
    }
}

/// "Yes" / "No"
pub fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

/// Render one move as the six output columns:
/// ticker, start, end, superperformance, drawdowns, continuation
pub fn format_output_row(mv: &Move) -> [String; 6] {
    let drawdowns = if mv.drawdowns_formatted.is_empty() {
        "none".to_string()
    } else {
        mv.drawdowns_formatted.join(", ")
    };

    [
        mv.ticker.clone(),
        mv.start_date_formatted.clone(),
        mv.end_date_formatted.clone(),
        mv.superperformance_formatted.clone(),
        drawdowns,
        mv.continuation_formatted.clone(),
    ]
}

/// Column headers matching [`format_output_row`]
pub const OUTPUT_HEADERS: [&str; 6] = [
    "Ticker",
    "Start Date",
    "End Date",
    "Superperformance",
    "Drawdowns",
    "Continuation",
];
