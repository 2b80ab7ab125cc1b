//! # Calendar Controller
//!
//! Owns one calendar instance: anchor, grid, event store, view state and the
//! gesture trackers. Host input (drag handle, swipes, taps, fetch results)
//! goes through the controller, which keeps the pieces consistent:
//!
//! - an anchor change rebuilds the grid, resizes the metrics, resolves a
//!   pending week target, empties the store and marks the month for fetching
//! - fetch results are committed only for the anchor and generation that
//!   started them
//! - `on_date_select` fires whenever the selection changes, including when
//!   navigation or a return to month mode clears it

use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info, warn};
use shared::{AttendanceStatus, EventKind, FetchCalendarEventsRequest, FetchCalendarEventsResponse};

use super::anchor::CalendarAnchor;
use super::attendance::{AttendanceFailure, AttendanceMutator, AttendanceOutcome, AttendanceSnapshot};
use super::event_index::EventStore;
use super::month_grid::{MonthGrid, WeekRow};
use super::navigator::{NavigationOutcome, Navigator, SelectionChange};
use super::presentation::{self, BoardDirectory, DaySummary, MonthSummary};
use super::view_mode::{GridMetrics, SnapOutcome, ViewMode, ViewState};
use crate::config::CalendarConfig;
use crate::error::CalendarResult;
use crate::gestures::drag_listeners::{DragListenerRegistration, ViewportListeners};
use crate::gestures::swipe::{PointerPosition, SwipeConfig, SwipeDirection, SwipeTracker};
use crate::services::api::{AttendanceSink, EventSource};
use crate::services::date_utils;

/// Host hooks. Every hook is optional.
#[derive(Default)]
pub struct CalendarCallbacks {
    pub on_date_select: Option<Box<dyn FnMut(Option<NaiveDate>)>>,
    /// Board card clicked, with the board id
    pub on_item_click: Option<Box<dyn FnMut(&str)>>,
    /// Match card clicked, with the match id
    pub on_match_click: Option<Box<dyn FnMut(&str)>>,
    /// An attendance write failed after the local value was changed
    pub on_attendance_error: Option<Box<dyn FnMut(&AttendanceFailure)>>,
}

/// An in-flight fetch, committed later with [`CalendarController::complete_fetch`]
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub anchor: CalendarAnchor,
    pub generation: u64,
    pub request: FetchCalendarEventsRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchCommit {
    Applied { event_count: usize },
    /// The anchor moved or a newer fetch started; the response was dropped
    Stale,
}

pub struct CalendarController {
    config: CalendarConfig,
    navigator: Navigator,
    grid: MonthGrid,
    metrics: GridMetrics,
    view: ViewState,
    store: EventStore,
    swipe: SwipeTracker,
    attendance: AttendanceMutator,
    drag_listeners: DragListenerRegistration,
    viewport: Option<Box<dyn ViewportListeners>>,
    callbacks: CalendarCallbacks,
    fetch_generation: u64,
    refresh_token: Option<u64>,
    needs_fetch: bool,
    today: NaiveDate,
}

impl CalendarController {
    pub fn new(config: CalendarConfig, anchor: CalendarAnchor, today: NaiveDate) -> Self {
        let grid = MonthGrid::build(anchor);
        let metrics = GridMetrics::measured(
            config.fallback_week_row_height_px,
            config.fallback_week_row_height_px,
            grid.row_count(),
        );
        let view = ViewState::new(&metrics);
        let swipe = SwipeTracker::new(SwipeConfig::from(&config));
        let attendance = AttendanceMutator::new(config.acting_user_id.clone());

        info!("📅 Calendar opened on {} ({} rows)", anchor, grid.row_count());

        Self {
            config,
            navigator: Navigator::new(anchor),
            grid,
            metrics,
            view,
            store: EventStore::new(anchor),
            swipe,
            attendance,
            drag_listeners: DragListenerRegistration::new(),
            viewport: None,
            callbacks: CalendarCallbacks::default(),
            fetch_generation: 0,
            refresh_token: None,
            needs_fetch: true,
            today,
        }
    }

    /// Controller for the current month and today's date
    pub fn for_today(config: CalendarConfig) -> Self {
        Self::new(config, CalendarAnchor::current(), date_utils::today())
    }

    pub fn with_callbacks(mut self, callbacks: CalendarCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn set_viewport_listeners(&mut self, viewport: Box<dyn ViewportListeners>) {
        self.viewport = Some(viewport);
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn anchor(&self) -> CalendarAnchor {
        self.navigator.anchor()
    }

    pub fn title(&self) -> String {
        self.anchor().title()
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn swipe_progress(&self) -> f32 {
        self.swipe.progress()
    }

    pub fn needs_fetch(&self) -> bool {
        self.needs_fetch
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Rows to render: the whole grid in month mode, the active row in week mode
    pub fn visible_rows(&self) -> &[WeekRow] {
        let rows = self.grid.rows();
        match self.view.mode() {
            ViewMode::Month => rows,
            ViewMode::Week => {
                let index = self.view.active_week_index().min(self.grid.last_row_index());
                &rows[index..=index]
            }
        }
    }

    /// Row height reported by the host after layout or resize
    pub fn measure_week_row_height(&mut self, height_px: f32) {
        self.metrics = GridMetrics::measured(
            height_px,
            self.config.fallback_week_row_height_px,
            self.grid.row_count(),
        );
        self.view.sync_to_grid(&self.metrics, &self.grid);
        debug!("Week row height set to {}px", self.metrics.week_row_height());
    }

    // Drag handle

    pub fn drag_start(&mut self, pointer_y: f32) -> bool {
        if !self.view.drag_start(pointer_y) {
            return false;
        }
        if let Some(viewport) = self.viewport.as_deref_mut() {
            self.drag_listeners.attach(viewport);
        }
        true
    }

    pub fn drag_move(&mut self, pointer_y: f32) -> Option<f32> {
        self.view.drag_move(pointer_y, &self.metrics)
    }

    pub fn drag_end(&mut self) -> Option<SnapOutcome> {
        self.release_drag_listeners();
        let outcome = self.view.drag_end(&self.metrics, &self.grid, self.today)?;
        if outcome.selection_cleared {
            self.notify_date_select(None);
        }
        Some(outcome)
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.release_drag_listeners();
        self.view.cancel_drag()
    }

    /// Switch mode without a drag (e.g. a toggle button)
    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.view.set_mode(mode, &self.metrics, &self.grid, self.today) {
            self.notify_date_select(None);
        }
    }

    fn release_drag_listeners(&mut self) {
        if let Some(viewport) = self.viewport.as_deref_mut() {
            self.drag_listeners.detach(viewport);
        }
    }

    // Swipes

    pub fn pointer_down(&mut self, position: PointerPosition) {
        self.swipe.pointer_down(position);
    }

    pub fn pointer_move(&mut self, position: PointerPosition) -> Option<f32> {
        self.swipe.pointer_move(position)
    }

    /// Finish a swipe. Horizontal swipes page forward (left) or back (right)
    /// by week in week mode and by month in month mode.
    pub fn pointer_up(&mut self, position: Option<PointerPosition>) -> Option<SwipeDirection> {
        let direction = self.swipe.pointer_up(position)?;
        match (direction, self.view.mode()) {
            (SwipeDirection::Left, ViewMode::Week) => {
                self.next_week();
            }
            (SwipeDirection::Right, ViewMode::Week) => {
                self.prev_week();
            }
            (SwipeDirection::Left, ViewMode::Month) => {
                self.next_month();
            }
            (SwipeDirection::Right, ViewMode::Month) => {
                self.prev_month();
            }
            (SwipeDirection::Up | SwipeDirection::Down, _) => {
                debug!("Ignoring vertical swipe {:?}", direction);
            }
        }
        Some(direction)
    }

    pub fn pointer_cancel(&mut self) {
        self.swipe.pointer_cancel();
    }

    // Navigation

    pub fn next_month(&mut self) -> NavigationOutcome {
        let before = self.view.selected_date();
        let outcome = self.navigator.next_month(&mut self.view);
        self.after_navigation(outcome, before)
    }

    pub fn prev_month(&mut self) -> NavigationOutcome {
        let before = self.view.selected_date();
        let outcome = self.navigator.prev_month(&mut self.view);
        self.after_navigation(outcome, before)
    }

    pub fn go_to_month_of(&mut self, date: NaiveDate) -> NavigationOutcome {
        let before = self.view.selected_date();
        let outcome = self.navigator.go_to_month_of(date, &mut self.view);
        self.after_navigation(outcome, before)
    }

    pub fn next_week(&mut self) -> NavigationOutcome {
        let before = self.view.selected_date();
        let outcome = self.navigator.next_week(&mut self.view, &self.grid);
        self.after_navigation(outcome, before)
    }

    pub fn prev_week(&mut self) -> NavigationOutcome {
        let before = self.view.selected_date();
        let outcome = self.navigator.prev_week(&mut self.view, &self.grid);
        self.after_navigation(outcome, before)
    }

    pub fn select_date(&mut self, date: NaiveDate) -> SelectionChange {
        let change = self.navigator.select_date(&mut self.view, &self.grid, date);
        self.notify_date_select(change.selected_date());
        change
    }

    pub fn select_date_key(&mut self, key: &str) -> CalendarResult<SelectionChange> {
        let date = date_utils::parse_date_key(key)?;
        Ok(self.select_date(date))
    }

    fn after_navigation(&mut self, outcome: NavigationOutcome, before: Option<NaiveDate>) -> NavigationOutcome {
        if let NavigationOutcome::MonthChanged { to, .. } = outcome {
            self.grid = MonthGrid::build(to);
            self.metrics = self.metrics.with_row_count(self.grid.row_count());
            self.store.clear(to);
            self.needs_fetch = true;
        }
        self.navigator.resolve_pending(&mut self.view, &self.grid, &self.metrics);

        if self.view.selected_date() != before {
            self.notify_date_select(self.view.selected_date());
        }
        outcome
    }

    fn notify_date_select(&mut self, date: Option<NaiveDate>) {
        if let Some(on_date_select) = self.callbacks.on_date_select.as_mut() {
            on_date_select(date);
        }
    }

    // Fetching

    /// Host refresh signal; a new token schedules a fetch of the current month
    pub fn set_refresh_token(&mut self, token: u64) -> bool {
        if self.refresh_token == Some(token) {
            return false;
        }
        self.refresh_token = Some(token);
        self.needs_fetch = true;
        debug!("Refresh token {} received", token);
        true
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        self.needs_fetch = false;

        let anchor = self.anchor();
        let request = anchor.window().to_request();
        debug!(
            "🗓️ Fetching {} (generation {}): {}..{}",
            anchor, self.fetch_generation, request.month_start, request.month_end
        );

        FetchTicket {
            anchor,
            generation: self.fetch_generation,
            request,
        }
    }

    /// Commit a fetch result. A failed fetch shows an empty month.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<FetchCalendarEventsResponse>) -> FetchCommit {
        if ticket.anchor != self.anchor() || ticket.generation < self.fetch_generation {
            info!(
                "Discarding stale events for {} (generation {}, current {} generation {})",
                ticket.anchor,
                ticket.generation,
                self.anchor(),
                self.fetch_generation
            );
            return FetchCommit::Stale;
        }

        let events = match result {
            Ok(response) => response.events,
            Err(e) => {
                warn!("⚠️ Failed to fetch events for {}: {}", ticket.anchor, e);
                Vec::new()
            }
        };

        let event_count = events.len();
        self.store.replace_all(events, ticket.anchor);
        info!("📅 Loaded {} events for {}", event_count, ticket.anchor);
        FetchCommit::Applied { event_count }
    }

    /// Fetch and commit the current month in one step
    pub async fn load_events(&mut self, source: &dyn EventSource) -> FetchCommit {
        let ticket = self.begin_fetch();
        let result = source.fetch_calendar_events(&ticket.request).await;
        self.complete_fetch(ticket, result)
    }

    // Events

    pub async fn set_attendance(
        &mut self,
        sink: &dyn AttendanceSink,
        event_id: &str,
        status: AttendanceStatus,
    ) -> AttendanceOutcome {
        let outcome = self
            .attendance
            .set_attendance(&mut self.store, sink, event_id, status)
            .await;

        if let AttendanceOutcome::Failed(failure) = &outcome {
            if let Some(on_attendance_error) = self.callbacks.on_attendance_error.as_mut() {
                on_attendance_error(failure);
            }
        }
        outcome
    }

    pub fn revert_attendance(&mut self, snapshot: &AttendanceSnapshot) -> bool {
        self.attendance.revert(&mut self.store, snapshot)
    }

    /// Route a card tap to the matching host hook
    pub fn click_event(&mut self, event_id: &str) -> Option<EventKind> {
        let kind = self.store.get(event_id)?.kind();
        let hook = match kind {
            EventKind::Board => self.callbacks.on_item_click.as_mut(),
            EventKind::Match => self.callbacks.on_match_click.as_mut(),
        };
        if let Some(hook) = hook {
            hook(event_id);
        }
        Some(kind)
    }

    pub fn day_summary(&self, boards: &BoardDirectory, date: NaiveDate) -> DaySummary {
        presentation::day_summary(&self.store, boards, date)
    }

    pub fn month_summary(&self) -> MonthSummary {
        presentation::month_summary(&self.store, &self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::StaticEventSource;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use shared::UpdateAttendanceRequest;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FIXTURE: &str = r#"[
        { "type": "BOARD", "id": "b1", "title": "Spring trip", "startDate": "2025-03-14T08:00:00+09:00", "endDate": "2025-03-16T20:00:00+09:00" },
        { "type": "MATCH", "id": "m1", "title": "Home opener", "startDate": "2025-03-22T18:00:00+09:00", "attendanceStatus": "UNDECIDED",
          "attendances": [{ "userId": "me", "status": "UNDECIDED" }] },
        { "type": "MATCH", "id": "m2", "title": "Away game", "startDate": "2025-04-05T14:00:00+09:00" }
    ]"#;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn controller() -> CalendarController {
        let mut controller = CalendarController::new(
            CalendarConfig::default(),
            CalendarAnchor::new(2025, 3).unwrap(),
            ymd(2025, 3, 12),
        );
        controller.measure_week_row_height(50.0);
        controller
    }

    fn recorded_selections(controller: &mut CalendarController) -> Rc<RefCell<Vec<Option<NaiveDate>>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.callbacks.on_date_select = Some(Box::new(move |date| sink.borrow_mut().push(date)));
        seen
    }

    #[derive(Default)]
    struct CountingViewport {
        attached: Rc<RefCell<u32>>,
        detached: Rc<RefCell<u32>>,
    }

    impl ViewportListeners for CountingViewport {
        fn attach(&mut self) {
            *self.attached.borrow_mut() += 1;
        }

        fn detach(&mut self) {
            *self.detached.borrow_mut() += 1;
        }
    }

    struct FailingSink;

    #[async_trait]
    impl AttendanceSink for FailingSink {
        async fn update_attendance(&self, _request: &UpdateAttendanceRequest) -> Result<()> {
            Err(anyhow!("timeout"))
        }
    }

    #[test]
    fn test_drag_snaps_and_manages_listeners() {
        let mut controller = controller();
        let viewport = CountingViewport::default();
        let attached = Rc::clone(&viewport.attached);
        let detached = Rc::clone(&viewport.detached);
        controller.set_viewport_listeners(Box::new(viewport));

        // 6 rows of 50px: threshold 175px
        assert!(controller.drag_start(400.0));
        assert!(controller.drag_start(400.0));
        assert_eq!(controller.drag_move(270.0), Some(170.0));
        let outcome = controller.drag_end().unwrap();
        assert!(controller.drag_end().is_none());

        assert_eq!(outcome.mode, ViewMode::Week);
        assert_eq!(controller.view().committed_height_px(), 50.0);
        // today (12th) is in row 2
        assert_eq!(controller.visible_rows().len(), 1);
        assert_eq!(controller.view().active_week_index(), 2);
        assert_eq!(*attached.borrow(), 1);
        assert_eq!(*detached.borrow(), 1);
    }

    #[test]
    fn test_returning_to_month_notifies_cleared_selection() {
        let mut controller = controller();
        let seen = recorded_selections(&mut controller);

        controller.set_mode(ViewMode::Week);
        controller.select_date(ymd(2025, 3, 20));
        controller.drag_start(0.0);
        controller.drag_move(290.0);
        controller.drag_end();

        assert_eq!(controller.view().mode(), ViewMode::Month);
        assert_eq!(*seen.borrow(), vec![Some(ymd(2025, 3, 20)), None]);
    }

    #[test]
    fn test_month_change_resets_store_and_notifies() {
        let mut controller = controller();
        let seen = recorded_selections(&mut controller);

        controller.select_date_key("2025-03-15").unwrap();
        let ticket = controller.begin_fetch();
        assert!(!controller.needs_fetch());

        let outcome = controller.next_month();

        assert!(outcome.month_changed());
        assert_eq!(controller.anchor(), CalendarAnchor::new(2025, 4).unwrap());
        assert_eq!(controller.grid().row_count(), 5);
        assert_eq!(controller.metrics().month_grid_height(), 250.0);
        assert_eq!(controller.view().committed_height_px(), 250.0);
        assert!(controller.store().is_empty());
        assert!(controller.needs_fetch());
        assert_eq!(*seen.borrow(), vec![Some(ymd(2025, 3, 15)), None]);

        // March response arriving after the move is dropped
        let late = controller.complete_fetch(ticket, Ok(FetchCalendarEventsResponse::default()));
        assert_eq!(late, FetchCommit::Stale);
    }

    #[test]
    fn test_week_rollover_in_month_mode_notifies_cleared_selection() {
        let mut controller = controller();
        let seen = recorded_selections(&mut controller);

        controller.select_date(ymd(2025, 3, 31));
        assert_eq!(controller.view().active_week_index(), 5);

        let outcome = controller.next_week();

        assert!(outcome.month_changed());
        assert_eq!(controller.anchor(), CalendarAnchor::new(2025, 4).unwrap());
        assert_eq!(controller.view().mode(), ViewMode::Month);
        assert_eq!(controller.view().selected_date(), None);
        assert_eq!(controller.view().active_week_index(), 0);
        assert_eq!(*seen.borrow(), vec![Some(ymd(2025, 3, 31)), None]);
    }

    #[test]
    fn test_week_swipes_roll_over_month() {
        let mut controller = controller();
        controller.set_mode(ViewMode::Week);
        for _ in 0..3 {
            controller.next_week();
        }
        assert_eq!(controller.view().active_week_index(), 5);

        controller.pointer_down(PointerPosition::new(300.0, 100.0));
        controller.pointer_move(PointerPosition::new(250.0, 102.0));
        let swipe = controller.pointer_up(Some(PointerPosition::new(200.0, 104.0)));

        assert_eq!(swipe, Some(SwipeDirection::Left));
        assert_eq!(controller.anchor(), CalendarAnchor::new(2025, 4).unwrap());
        assert_eq!(controller.view().active_week_index(), 0);
        assert_eq!(controller.swipe_progress(), 0.0);
    }

    #[test]
    fn test_right_swipe_in_month_mode_goes_back() {
        let mut controller = controller();
        controller.pointer_down(PointerPosition::new(100.0, 100.0));
        controller.pointer_up(Some(PointerPosition::new(200.0, 110.0)));
        assert_eq!(controller.anchor(), CalendarAnchor::new(2025, 2).unwrap());
    }

    #[test]
    fn test_vertical_swipe_does_not_navigate() {
        let mut controller = controller();
        controller.pointer_down(PointerPosition::new(100.0, 100.0));
        let swipe = controller.pointer_up(Some(PointerPosition::new(105.0, 300.0)));
        assert_eq!(swipe, Some(SwipeDirection::Down));
        assert_eq!(controller.anchor(), CalendarAnchor::new(2025, 3).unwrap());
    }

    #[test]
    fn test_newer_fetch_wins() {
        let mut controller = controller();
        let first = controller.begin_fetch();
        assert!(controller.set_refresh_token(7));
        assert!(!controller.set_refresh_token(7));
        let second = controller.begin_fetch();

        let applied = controller.complete_fetch(second, Ok(FetchCalendarEventsResponse::default()));
        assert_eq!(applied, FetchCommit::Applied { event_count: 0 });
        assert_eq!(
            controller.complete_fetch(first, Ok(FetchCalendarEventsResponse::default())),
            FetchCommit::Stale
        );
    }

    #[test]
    fn test_failed_fetch_shows_empty_month() {
        let mut controller = controller();
        let ticket = controller.begin_fetch();
        let commit = controller.complete_fetch(ticket, Err(anyhow!("network down")));
        assert_eq!(commit, FetchCommit::Applied { event_count: 0 });
        assert!(controller.store().is_empty());
    }

    #[tokio::test]
    async fn test_load_events_indexes_month() {
        let mut controller = controller();
        let source = StaticEventSource::from_json(FIXTURE).unwrap();

        let commit = controller.load_events(&source).await;

        assert_eq!(commit, FetchCommit::Applied { event_count: 2 });
        assert_eq!(controller.store().events_on(ymd(2025, 3, 15)).count(), 1);
        let summary = controller.month_summary();
        assert_eq!(summary.board_count, 1);
        assert_eq!(summary.match_count, 1);
        assert_eq!(summary.busy_days, 4);

        let day = controller.day_summary(&BoardDirectory::default(), ymd(2025, 3, 22));
        assert_eq!(day.cards[0].title, "Home opener");
    }

    #[tokio::test]
    async fn test_attendance_failure_reaches_hook() {
        let mut controller = controller();
        let source = StaticEventSource::from_json(FIXTURE).unwrap();
        controller.load_events(&source).await;

        let failures = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&failures);
        controller.callbacks.on_attendance_error =
            Some(Box::new(move |failure: &AttendanceFailure| sink.borrow_mut().push(failure.clone())));

        let outcome = controller
            .set_attendance(&FailingSink, "m1", AttendanceStatus::Attending)
            .await;

        let AttendanceOutcome::Failed(failure) = outcome else {
            panic!("expected a failed write");
        };
        assert_eq!(failures.borrow().len(), 1);

        let event = controller.store().get("m1").and_then(|event| event.as_match()).unwrap();
        assert_eq!(event.attendance_status, Some(AttendanceStatus::Attending));

        assert!(controller.revert_attendance(&failure.snapshot));
        let event = controller.store().get("m1").and_then(|event| event.as_match()).unwrap();
        assert_eq!(event.attendance_status, Some(AttendanceStatus::Undecided));
    }

    #[tokio::test]
    async fn test_click_routes_by_kind() {
        let mut controller = controller();
        let source = StaticEventSource::from_json(FIXTURE).unwrap();
        controller.load_events(&source).await;

        let clicked = Rc::new(RefCell::new(Vec::new()));
        let boards = Rc::clone(&clicked);
        let matches = Rc::clone(&clicked);
        controller.callbacks.on_item_click = Some(Box::new(move |id: &str| boards.borrow_mut().push(format!("board:{}", id))));
        controller.callbacks.on_match_click = Some(Box::new(move |id: &str| matches.borrow_mut().push(format!("match:{}", id))));

        assert_eq!(controller.click_event("b1"), Some(EventKind::Board));
        assert_eq!(controller.click_event("m1"), Some(EventKind::Match));
        assert_eq!(controller.click_event("missing"), None);
        assert_eq!(*clicked.borrow(), vec!["board:b1".to_string(), "match:m1".to_string()]);
    }

    #[test]
    fn test_degenerate_row_height_uses_fallback() {
        let mut controller = controller();
        controller.measure_week_row_height(0.0);
        assert_eq!(controller.metrics().week_row_height(), controller.config().fallback_week_row_height_px);
        assert!(controller.view().committed_height_px() > 0.0);
    }
}
