//! Display-ready views of the indexed events.
//!
//! Nothing here mutates the store. Board events are joined against the
//! host-supplied board items for their thumbnail and title; match events
//! carry their attendance through unchanged.

use chrono::{DateTime, FixedOffset, NaiveDate};
use log::debug;
use shared::{AttendanceStatus, BoardItem, CalendarEvent, EventKind};
use std::collections::{HashMap, HashSet};

use super::anchor::CalendarAnchor;
use super::event_index::EventStore;
use super::month_grid::MonthGrid;
use crate::services::thumbnail_cache::{ThumbnailCache, ThumbnailResolver};

/// Host-supplied board items keyed by board id
#[derive(Debug, Clone, Default)]
pub struct BoardDirectory {
    items: HashMap<String, BoardItem>,
}

impl BoardDirectory {
    pub fn new(items: Vec<BoardItem>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id.clone(), item)).collect(),
        }
    }

    pub fn get(&self, board_id: &str) -> Option<&BoardItem> {
        self.items.get(board_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace thumbnail storage keys with displayable URLs.
    /// Values that already are http(s) URLs are left as they are; keys that
    /// fail to resolve keep their raw value.
    pub async fn resolve_thumbnails(&mut self, cache: &mut ThumbnailCache, resolver: &dyn ThumbnailResolver) -> usize {
        let mut resolved = 0;
        for item in self.items.values_mut() {
            let Some(thumbnail) = item.thumbnail_url.as_deref() else {
                continue;
            };
            if is_displayable_url(thumbnail) {
                continue;
            }
            if let Some(url) = cache.get_or_fetch(thumbnail, resolver).await {
                item.thumbnail_url = Some(url);
                resolved += 1;
            }
        }
        debug!("Resolved {} board thumbnails", resolved);
        resolved
    }
}

fn is_displayable_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// One event as shown in a day cell or the day detail list
#[derive(Debug, Clone, PartialEq)]
pub struct EventCard {
    pub event_id: String,
    pub kind: EventKind,
    pub title: String,
    pub start: DateTime<FixedOffset>,
    pub thumbnail_url: Option<String>,
    pub attendance_status: Option<AttendanceStatus>,
    pub is_multi_day: bool,
    /// The event started on an earlier day
    pub is_continuation: bool,
}

impl EventCard {
    fn for_day(event: &CalendarEvent, boards: &BoardDirectory, date: NaiveDate) -> Self {
        let (title, thumbnail_url, attendance_status) = match event {
            CalendarEvent::Board(board) => {
                let item = boards.get(&board.id);
                (
                    item.map(|item| item.title.clone()).unwrap_or_else(|| board.title.clone()),
                    item.and_then(|item| item.thumbnail_url.clone()),
                    None,
                )
            }
            CalendarEvent::Match(details) => (details.title.clone(), None, details.attendance_status),
        };

        Self {
            event_id: event.id().to_string(),
            kind: event.kind(),
            title,
            start: event.start_date(),
            thumbnail_url,
            attendance_status,
            is_multi_day: event.is_multi_day(),
            is_continuation: event.start_day() < date,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// Sorted by start time, earliest first
    pub cards: Vec<EventCard>,
    pub board_count: usize,
    pub match_count: usize,
}

impl DaySummary {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

pub fn day_summary(store: &EventStore, boards: &BoardDirectory, date: NaiveDate) -> DaySummary {
    let mut seen = HashSet::new();
    let mut cards: Vec<EventCard> = store
        .events_on(date)
        .filter(|event| seen.insert(event.id()))
        .map(|event| EventCard::for_day(event, boards, date))
        .collect();
    cards.sort_by_key(|card| card.start);

    let board_count = cards.iter().filter(|card| card.kind == EventKind::Board).count();
    let match_count = cards.len() - board_count;

    DaySummary {
        date,
        cards,
        board_count,
        match_count,
    }
}

/// Distinct events visible in a month grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    pub anchor: CalendarAnchor,
    pub board_count: usize,
    pub match_count: usize,
    /// Days of the grid with at least one event
    pub busy_days: usize,
}

pub fn month_summary(store: &EventStore, grid: &MonthGrid) -> MonthSummary {
    let mut boards = HashSet::new();
    let mut matches = HashSet::new();
    let mut busy_days = 0;

    for date in grid.days() {
        let mut busy = false;
        for event in store.events_on(date) {
            busy = true;
            match event.kind() {
                EventKind::Board => boards.insert(event.id()),
                EventKind::Match => matches.insert(event.id()),
            };
        }
        if busy {
            busy_days += 1;
        }
    }

    MonthSummary {
        anchor: grid.anchor(),
        board_count: boards.len(),
        match_count: matches.len(),
        busy_days,
    }
}
