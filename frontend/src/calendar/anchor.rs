//! The year/month pair currently displayed by the calendar.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::FetchCalendarEventsRequest;
use std::fmt;
use std::str::FromStr;

use crate::error::{CalendarError, CalendarResult};
use crate::services::date_utils;

/// Six rows of seven cells
const VISIBLE_SPAN_DAYS: u64 = 42;

/// Anchor month of the calendar, stored as the first day of that month.
///
/// Only the navigator moves the anchor; the grid builder just reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarAnchor {
    first_day: NaiveDate,
}

impl CalendarAnchor {
    /// Create an anchor for `month` (1-12) of `year`
    pub fn new(year: i32, month: u32) -> CalendarResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidYear(year))?;
        Ok(Self { first_day })
    }

    /// Anchor for the month that contains `date`
    pub fn containing(date: NaiveDate) -> Self {
        // Day 1 always exists for a month that contains a valid date
        let first_day = date.with_day(1).unwrap_or(date);
        Self { first_day }
    }

    /// Anchor for the current local month
    pub fn current() -> Self {
        Self::containing(date_utils::today())
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Day before the first of the following month
    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next_first| next_first.pred_opt())
            .unwrap_or(self.first_day)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// First and last day of the six-week span a grid for this month can
    /// show, starting on the Sunday on or before day 1
    pub fn visible_span(&self) -> (NaiveDate, NaiveDate) {
        let lead = date_utils::weekday_column(self.first_day) as u64;
        let start = self
            .first_day
            .checked_sub_days(Days::new(lead))
            .unwrap_or(self.first_day);
        let end = start
            .checked_add_days(Days::new(VISIBLE_SPAN_DAYS - 1))
            .unwrap_or_else(|| self.last_day());
        (start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The following month; stays put at the end of the representable range
    pub fn next(&self) -> Self {
        let first_day = self
            .first_day
            .checked_add_months(Months::new(1))
            .unwrap_or(self.first_day);
        Self { first_day }
    }

    /// The preceding month; stays put at the start of the representable range
    pub fn previous(&self) -> Self {
        let first_day = self
            .first_day
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.first_day);
        Self { first_day }
    }

    /// Fetch window covering this month
    pub fn window(&self) -> MonthWindow {
        MonthWindow {
            first_day: self.first_day,
            last_day: self.last_day(),
        }
    }

    /// Header title, e.g. "March 2025"
    pub fn title(&self) -> String {
        format!("{} {}", date_utils::month_name(self.month()), self.year())
    }
}

impl Default for CalendarAnchor {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for CalendarAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Parses the `YYYY-MM` form written by `Display`
impl FromStr for CalendarAnchor {
    type Err = CalendarError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidMonthKey(key.to_string());
        let (year, month) = key.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// Inclusive date window of one month, as sent to the event source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl MonthWindow {
    /// RFC 3339 start of the window (first day, midnight UTC)
    pub fn month_start(&self) -> String {
        format!("{}T00:00:00Z", date_utils::date_key(self.first_day))
    }

    /// RFC 3339 end of the window (last day, 23:59:59 UTC)
    pub fn month_end(&self) -> String {
        format!("{}T23:59:59Z", date_utils::date_key(self.last_day))
    }

    pub fn to_request(&self) -> FetchCalendarEventsRequest {
        FetchCalendarEventsRequest {
            month_start: self.month_start(),
            month_end: self.month_end(),
        }
    }

    /// Whether an inclusive day span overlaps this window
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.last_day && end >= self.first_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_month() {
        assert!(matches!(CalendarAnchor::new(2025, 13), Err(CalendarError::InvalidMonth(13))));
        assert!(matches!(CalendarAnchor::new(2025, 0), Err(CalendarError::InvalidMonth(0))));
    }

    #[test]
    fn test_navigation() {
        let june = CalendarAnchor::new(2025, 6).unwrap();
        assert_eq!(june.previous(), CalendarAnchor::new(2025, 5).unwrap());
        assert_eq!(june.next(), CalendarAnchor::new(2025, 7).unwrap());

        let january = CalendarAnchor::new(2025, 1).unwrap();
        assert_eq!(january.previous(), CalendarAnchor::new(2024, 12).unwrap());

        let december = CalendarAnchor::new(2025, 12).unwrap();
        assert_eq!(december.next(), CalendarAnchor::new(2026, 1).unwrap());
    }

    #[test]
    fn test_containing_and_bounds() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 17).unwrap();
        let anchor = CalendarAnchor::containing(date);
        assert_eq!(anchor.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(anchor.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(anchor.contains(date));
        assert!(!anchor.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn test_window_request() {
        let request = CalendarAnchor::new(2025, 6).unwrap().window().to_request();
        assert_eq!(request.month_start, "2025-06-01T00:00:00Z");
        assert_eq!(request.month_end, "2025-06-30T23:59:59Z");
    }

    #[test]
    fn test_title_and_display() {
        let anchor = CalendarAnchor::new(2025, 3).unwrap();
        assert_eq!(anchor.title(), "March 2025");
        assert_eq!(anchor.to_string(), "2025-03");
    }

    #[test]
    fn test_days_in_month_follows_leap_years() {
        assert_eq!(CalendarAnchor::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(CalendarAnchor::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(CalendarAnchor::new(2000, 2).unwrap().days_in_month(), 29);
        assert_eq!(CalendarAnchor::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(CalendarAnchor::new(2025, 4).unwrap().days_in_month(), 30);
        assert_eq!(
            CalendarAnchor::new(2025, 12).unwrap().last_day(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_visible_span_starts_on_sunday() {
        // March 1st 2025 is a Saturday
        let (start, end) = CalendarAnchor::new(2025, 3).unwrap().visible_span();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 2, 23).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 4, 5).unwrap());

        // June 1st 2025 is a Sunday
        let (start, _) = CalendarAnchor::new(2025, 6).unwrap().visible_span();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn test_parse_month_key() {
        assert_eq!("2025-03".parse::<CalendarAnchor>().unwrap(), CalendarAnchor::new(2025, 3).unwrap());
        assert!(matches!("2025-13".parse::<CalendarAnchor>(), Err(CalendarError::InvalidMonth(13))));
        assert!(matches!("March".parse::<CalendarAnchor>(), Err(CalendarError::InvalidMonthKey(_))));
    }
}
