/// Utilities for date formatting
///
/// Order dates arrive from the backend either as plain dates or as ISO
/// datetimes; the worklist shows them in the short US format.
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// Format an order date for display
/// Example: "2024-03-15T14:02:26Z" or "2024-03-15" -> "Mar 15, 2024"
///
/// Empty input stays empty, unparseable input is returned unchanged.
pub fn format_order_date(date_str: &str) -> String {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    parse_date(trimmed)
        .map(|d| d.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| date_str.to_string())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// `yyyy-mm-dd` of the day `days` before `today`, the value a date input expects
pub fn lookback_date(today: NaiveDate, days: i64) -> String {
    (today - Duration::days(days)).format("%Y-%m-%d").to_string()
}
