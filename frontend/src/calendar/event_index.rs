//! # Event Index
//!
//! Maps each calendar day to the events covering it. A multi-day event is
//! placed in the bucket of every day from its start day to its end day
//! (inclusive), so it shows on every covered cell while remaining a single
//! logical event in the store.
//!
//! Buckets hold positions into the [`EventStore`] event list rather than
//! copies. An in-place field update on an event (attendance) is therefore
//! visible from every bucket without re-indexing, while replacing the list
//! or an event rebuilds the index.

use chrono::NaiveDate;
use log::{debug, warn};
use shared::{CalendarEvent, MatchEvent};
use std::collections::BTreeMap;

use super::anchor::CalendarAnchor;
use crate::error::CalendarResult;
use crate::services::date_utils;

/// Day → positions of the events covering that day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsByDate {
    anchor: CalendarAnchor,
    buckets: BTreeMap<NaiveDate, Vec<usize>>,
}

impl EventsByDate {
    fn empty(anchor: CalendarAnchor) -> Self {
        Self {
            anchor,
            buckets: BTreeMap::new(),
        }
    }

    /// Month this index was built for
    pub fn anchor(&self) -> CalendarAnchor {
        self.anchor
    }

    /// Positions of the events covering `date`, in source order
    pub fn get(&self, date: NaiveDate) -> &[usize] {
        self.buckets.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Same as [`EventsByDate::get`], addressed by `YYYY-MM-DD` key
    pub fn get_by_key(&self, key: &str) -> CalendarResult<&[usize]> {
        let date = date_utils::parse_date_key(key)?;
        Ok(self.get(date))
    }

    /// Days that have at least one event
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.buckets.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Build the day index for `events` as displayed in `anchor`.
/// Coverage is cut to the six-week span a grid for `anchor` can show.
pub fn index(events: &[CalendarEvent], anchor: CalendarAnchor) -> EventsByDate {
    let mut by_date = EventsByDate::empty(anchor);
    let (span_start, span_end) = anchor.visible_span();

    for (position, event) in events.iter().enumerate() {
        let start = event.start_day();
        let mut end = event.end_day();
        if end < start {
            warn!("⚠️ Event {} ends before it starts, indexing its start day only", event.id());
            end = start;
        }

        let first = start.max(span_start);
        let last = end.min(span_end);
        if first > last {
            continue;
        }

        for day in first.iter_days().take_while(|day| *day <= last) {
            by_date.buckets.entry(day).or_default().push(position);
        }
    }

    debug!(
        "🗓️ Indexed {} events onto {} days for {}",
        events.len(),
        by_date.buckets.len(),
        anchor
    );
    by_date
}

/// The events of the visible month together with their day index
#[derive(Debug, Clone)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
    index: EventsByDate,
}

impl EventStore {
    /// Empty store for `anchor`
    pub fn new(anchor: CalendarAnchor) -> Self {
        Self {
            events: Vec::new(),
            index: EventsByDate::empty(anchor),
        }
    }

    /// Replace every event and re-derive the index
    pub fn replace_all(&mut self, events: Vec<CalendarEvent>, anchor: CalendarAnchor) {
        self.index = index(&events, anchor);
        self.events = events;
    }

    /// Drop all events, e.g. after the anchor moved and before a refetch lands
    pub fn clear(&mut self, anchor: CalendarAnchor) {
        self.events.clear();
        self.index = EventsByDate::empty(anchor);
    }

    /// Swap in a new version of an event (matched by id).
    /// Its coverage may have changed, so the index is rebuilt.
    pub fn replace_event(&mut self, event: CalendarEvent) -> bool {
        let Some(position) = self.position(event.id()) else {
            return false;
        };
        self.events[position] = event;
        self.index = index(&self.events, self.index.anchor());
        true
    }

    pub fn anchor(&self) -> CalendarAnchor {
        self.index.anchor()
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn index(&self) -> &EventsByDate {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn position(&self, event_id: &str) -> Option<usize> {
        self.events.iter().position(|event| event.id() == event_id)
    }

    pub fn get(&self, event_id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| event.id() == event_id)
    }

    /// Mutable access to a match, for sub-state updates that keep coverage unchanged
    pub(crate) fn match_mut(&mut self, event_id: &str) -> Option<&mut MatchEvent> {
        self.events
            .iter_mut()
            .find(|event| event.id() == event_id)
            .and_then(CalendarEvent::as_match_mut)
    }

    /// Events covering `date`, in source order
    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &CalendarEvent> + '_ {
        self.index
            .get(date)
            .iter()
            .filter_map(move |position| self.events.get(*position))
    }
}
