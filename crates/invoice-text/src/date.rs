//! Date parsing and formatting

use crate::{Result, TextError};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};

/// English month names (long)
const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parse a stored date leniently
///
/// Accepts RFC 3339 timestamps (`2025-03-01T00:00:00.000Z`), naive
/// timestamps and plain `YYYY-MM-DD` dates. Timestamps keep the calendar
/// date of their own offset. Returns `None` for empty or unparseable input.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Parse a stored date, failing on bad input
pub fn parse_date_strict(text: &str) -> Result<NaiveDate> {
    parse_date(text).ok_or_else(|| TextError::InvalidDate(text.to_string()))
}

/// Format a date as `March 1, 2025`
pub fn format_long_date(date: NaiveDate) -> String {
    let month = MONTHS_LONG[date.month0() as usize];
    format!("{} {}, {}", month, date.day(), date.year())
}

/// Due date: `offset_days` after the issue date
pub fn due_date(issue: NaiveDate, offset_days: u32) -> Option<NaiveDate> {
    issue.checked_add_days(Days::new(u64::from(offset_days)))
}
