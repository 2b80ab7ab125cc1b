//! # Collaborator Interfaces
//!
//! The calendar engine does not talk to the network itself. The host wires in
//! implementations of these traits (a REST client, a mock, a local fixture)
//! and the engine calls them at the points the calendar needs data.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use shared::{
    CalendarEvent, FetchCalendarEventsRequest, FetchCalendarEventsResponse, UpdateAttendanceRequest,
};

use crate::calendar::anchor::MonthWindow;

/// Source of the events shown for one month window
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch the events overlapping `[month_start, month_end]`
    async fn fetch_calendar_events(
        &self,
        request: &FetchCalendarEventsRequest,
    ) -> Result<FetchCalendarEventsResponse>;
}

/// Backing write for a match attendance change
#[async_trait]
pub trait AttendanceSink: Send + Sync {
    async fn update_attendance(&self, request: &UpdateAttendanceRequest) -> Result<()>;
}

/// Event source over a fixed list of events, filtered by month window
#[derive(Debug, Clone, Default)]
pub struct StaticEventSource {
    events: Vec<CalendarEvent>,
}

impl StaticEventSource {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }

    /// Load events from a JSON array (the same shape the backend returns)
    pub fn from_json(json: &str) -> Result<Self> {
        let events: Vec<CalendarEvent> = serde_json::from_str(json)?;
        Ok(Self::new(events))
    }

    fn window_of(request: &FetchCalendarEventsRequest) -> Result<MonthWindow> {
        let first_day = chrono::DateTime::parse_from_rfc3339(&request.month_start)?.date_naive();
        let last_day = chrono::DateTime::parse_from_rfc3339(&request.month_end)?.date_naive();
        Ok(MonthWindow { first_day, last_day })
    }
}

#[async_trait]
impl EventSource for StaticEventSource {
    async fn fetch_calendar_events(
        &self,
        request: &FetchCalendarEventsRequest,
    ) -> Result<FetchCalendarEventsResponse> {
        let window = Self::window_of(request)?;
        let events: Vec<CalendarEvent> = self
            .events
            .iter()
            .filter(|event| window.overlaps(event.start_day(), event.end_day()))
            .cloned()
            .collect();

        debug!(
            "Static source returning {} of {} events for {}..{}",
            events.len(),
            self.events.len(),
            request.month_start,
            request.month_end
        );
        Ok(FetchCalendarEventsResponse { events })
    }
}
