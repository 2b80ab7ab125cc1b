use chrono::{Datelike, Local, NaiveDate};

use crate::error::{CalendarError, CalendarResult};

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}

/// Weekday column of a date (0 = Sunday, 1 = Monday, ..., 6 = Saturday)
pub fn weekday_column(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// ISO key (`YYYY-MM-DD`) used by the per-day event lookup and by hosts
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` key back into a date
pub fn parse_date_key(key: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDateKey(key.to_string()))
}

/// Format a date for display (e.g., "March 15, 2025")
pub fn format_date_for_display(date: NaiveDate) -> String {
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
