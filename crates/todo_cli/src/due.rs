//! Due-moment parsing for command-line input.

use chrono::{DateTime, NaiveDate};

/// Parses `YYYY-MM-DD` (UTC midnight) or RFC 3339 into epoch milliseconds.
pub fn parse_due(value: &str) -> Result<i64, String> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc().timestamp_millis())
            .ok_or_else(|| format!("invalid date: {trimmed}"));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|moment| moment.timestamp_millis())
        .map_err(|_| format!("invalid date: {trimmed}. Expected YYYY-MM-DD or RFC 3339"))
}

/// Epoch milliseconds for a calendar day at UTC midnight.
pub fn day_start(year: i32, month: u32, day: u32) -> Option<i64> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
}
