use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dated record shown on the calendar.
///
/// Board events are journal posts ("memories") and may span several days.
/// Match events are scheduled sporting events the couple can attend; without
/// an `end_date` they cover a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalendarEvent {
    #[serde(rename = "BOARD")]
    Board(BoardEvent),
    #[serde(rename = "MATCH")]
    Match(MatchEvent),
}

/// Journal post placed on the calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardEvent {
    /// Board id, also the key into the host's board item lookup
    pub id: String,
    pub title: String,
    /// Timestamp with timezone (RFC 3339)
    pub start_date: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<FixedOffset>>,
}

/// Scheduled match with per-person attendance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub id: String,
    pub title: String,
    pub start_date: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<FixedOffset>>,
    /// Attendance of the acting user, as last known locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_status: Option<AttendanceStatus>,
    #[serde(default)]
    pub attendances: Vec<PersonAttendance>,
}

/// Discriminant of a [`CalendarEvent`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Board,
    Match,
}

impl CalendarEvent {
    pub fn id(&self) -> &str {
        match self {
            CalendarEvent::Board(board) => &board.id,
            CalendarEvent::Match(event) => &event.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CalendarEvent::Board(board) => &board.title,
            CalendarEvent::Match(event) => &event.title,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            CalendarEvent::Board(_) => EventKind::Board,
            CalendarEvent::Match(_) => EventKind::Match,
        }
    }

    pub fn start_date(&self) -> DateTime<FixedOffset> {
        match self {
            CalendarEvent::Board(board) => board.start_date,
            CalendarEvent::Match(event) => event.start_date,
        }
    }

    pub fn end_date(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            CalendarEvent::Board(board) => board.end_date,
            CalendarEvent::Match(event) => event.end_date,
        }
    }

    /// First covered calendar day, in the offset the timestamp was written in
    pub fn start_day(&self) -> NaiveDate {
        self.start_date().date_naive()
    }

    /// Last covered calendar day; equals `start_day` when there is no end date
    pub fn end_day(&self) -> NaiveDate {
        self.end_date()
            .map(|end| end.date_naive())
            .unwrap_or_else(|| self.start_day())
    }

    pub fn is_multi_day(&self) -> bool {
        self.end_day() > self.start_day()
    }

    pub fn as_match(&self) -> Option<&MatchEvent> {
        match self {
            CalendarEvent::Match(event) => Some(event),
            CalendarEvent::Board(_) => None,
        }
    }

    pub fn as_match_mut(&mut self) -> Option<&mut MatchEvent> {
        match self {
            CalendarEvent::Match(event) => Some(event),
            CalendarEvent::Board(_) => None,
        }
    }
}

/// Attendance state for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Attending,
    NotAttending,
    Undecided,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttendanceStatus::Attending => "attending",
            AttendanceStatus::NotAttending => "not attending",
            AttendanceStatus::Undecided => "undecided",
        };
        write!(f, "{}", label)
    }
}

/// One person's attendance record on a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonAttendance {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub status: AttendanceStatus,
}

/// Request for the events of one month window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchCalendarEventsRequest {
    /// Start of the window (RFC 3339)
    pub month_start: String,
    /// End of the window, inclusive (RFC 3339)
    pub month_end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchCalendarEventsResponse {
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

/// Request to change the acting user's attendance on a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRequest {
    pub event_id: String,
    pub status: AttendanceStatus,
}

/// Board item supplied by the host for display enrichment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}
