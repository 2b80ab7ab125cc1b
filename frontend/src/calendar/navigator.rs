//! # Week/Month Navigator
//!
//! Moves the anchor month or the active week while keeping `selected_date`
//! and `active_week_index` consistent.
//!
//! Week navigation can cross a month boundary. Rolling past the last row
//! lands on the first row of the next month; rolling before row 0 lands on
//! the *last* row of the previous month. That row index is unknown until the
//! new month's grid is built, so the navigator parks a [`WeekTarget`] and the
//! caller resolves it with [`Navigator::resolve_pending`] once the grid for
//! the new anchor exists.

use chrono::NaiveDate;
use log::{debug, info};

use super::anchor::CalendarAnchor;
use super::month_grid::MonthGrid;
use super::view_mode::{GridMetrics, ViewMode, ViewState};
use crate::error::CalendarResult;
use crate::services::date_utils;

/// Row to activate once the next grid is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekTarget {
    First,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Anchor unchanged; only the active week moved
    SameMonth,
    /// Anchor moved; the grid must be rebuilt and the events refetched
    MonthChanged {
        from: CalendarAnchor,
        to: CalendarAnchor,
    },
}

impl NavigationOutcome {
    pub fn month_changed(&self) -> bool {
        matches!(self, NavigationOutcome::MonthChanged { .. })
    }
}

/// Effect of [`Navigator::select_date`] on the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(NaiveDate),
    Cleared,
}

impl SelectionChange {
    pub fn selected_date(&self) -> Option<NaiveDate> {
        match self {
            SelectionChange::Selected(date) => Some(*date),
            SelectionChange::Cleared => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    anchor: CalendarAnchor,
    pending_week: Option<WeekTarget>,
}

impl Navigator {
    pub fn new(anchor: CalendarAnchor) -> Self {
        Self {
            anchor,
            pending_week: None,
        }
    }

    pub fn anchor(&self) -> CalendarAnchor {
        self.anchor
    }

    pub fn pending_week(&self) -> Option<WeekTarget> {
        self.pending_week
    }

    /// Show the following month; always clears the selection
    pub fn next_month(&mut self, view: &mut ViewState) -> NavigationOutcome {
        let to = self.anchor.next();
        self.move_to(to, view)
    }

    /// Show the preceding month; always clears the selection
    pub fn prev_month(&mut self, view: &mut ViewState) -> NavigationOutcome {
        let to = self.anchor.previous();
        self.move_to(to, view)
    }

    /// Jump straight to the month containing `date`
    pub fn go_to_month_of(&mut self, date: NaiveDate, view: &mut ViewState) -> NavigationOutcome {
        let to = CalendarAnchor::containing(date);
        if to == self.anchor {
            return NavigationOutcome::SameMonth;
        }
        self.move_to(to, view)
    }

    /// Next row, or the first row of the following month after the last row
    pub fn next_week(&mut self, view: &mut ViewState, grid: &MonthGrid) -> NavigationOutcome {
        if view.active_week_index < grid.last_row_index() {
            view.active_week_index += 1;
            debug!("📅 Next week: row {}", view.active_week_index);
            return NavigationOutcome::SameMonth;
        }

        let from = self.anchor;
        self.anchor = from.next();
        self.pending_week = Some(WeekTarget::First);
        Self::clear_selection_in_month_mode(view);
        info!("📅 Week rolled over into {}", self.anchor);
        NavigationOutcome::MonthChanged { from, to: self.anchor }
    }

    /// Previous row, or the last row of the preceding month before row 0
    pub fn prev_week(&mut self, view: &mut ViewState, grid: &MonthGrid) -> NavigationOutcome {
        if view.active_week_index > 0 {
            view.active_week_index = (view.active_week_index - 1).min(grid.last_row_index());
            debug!("📅 Previous week: row {}", view.active_week_index);
            return NavigationOutcome::SameMonth;
        }

        let from = self.anchor;
        self.anchor = from.previous();
        self.pending_week = Some(WeekTarget::Last);
        Self::clear_selection_in_month_mode(view);
        info!("📅 Week rolled back into {}", self.anchor);
        NavigationOutcome::MonthChanged { from, to: self.anchor }
    }

    /// Apply a parked week target against the grid of the current anchor and
    /// re-establish the view invariants for it
    pub fn resolve_pending(&mut self, view: &mut ViewState, grid: &MonthGrid, metrics: &GridMetrics) {
        if let Some(target) = self.pending_week.take() {
            view.active_week_index = match target {
                WeekTarget::First => 0,
                WeekTarget::Last => grid.last_row_index(),
            };
            debug!("Resolved {:?} week to row {} of {}", target, view.active_week_index, grid.anchor());
        }
        view.sync_to_grid(metrics, grid);
    }

    /// Toggle the selection of `date`. Selecting a date in another row of
    /// the current grid makes that row active.
    pub fn select_date(&mut self, view: &mut ViewState, grid: &MonthGrid, date: NaiveDate) -> SelectionChange {
        if view.selected_date == Some(date) {
            view.selected_date = None;
            info!("📅 Cleared selection of {}", date);
            return SelectionChange::Cleared;
        }

        view.selected_date = Some(date);
        if let Some(row) = grid.row_of(date) {
            if row != view.active_week_index {
                debug!("Selection moved active week {} -> {}", view.active_week_index, row);
                view.active_week_index = row;
            }
        }
        info!("📅 Selected day: {}", date);
        SelectionChange::Selected(date)
    }

    /// [`Navigator::select_date`] addressed by `YYYY-MM-DD` key
    pub fn select_date_key(&mut self, view: &mut ViewState, grid: &MonthGrid, key: &str) -> CalendarResult<SelectionChange> {
        let date = date_utils::parse_date_key(key)?;
        Ok(self.select_date(view, grid, date))
    }

    /// A month change in month mode drops the selection; week mode keeps it
    fn clear_selection_in_month_mode(view: &mut ViewState) {
        if view.mode == ViewMode::Month && view.selected_date.take().is_some() {
            debug!("Selection cleared by week rollover in month mode");
        }
    }

    fn move_to(&mut self, to: CalendarAnchor, view: &mut ViewState) -> NavigationOutcome {
        let from = self.anchor;
        self.anchor = to;
        self.pending_week = None;
        view.selected_date = None;
        info!("📅 Navigated from {} to {}", from, to);
        NavigationOutcome::MonthChanged { from, to }
    }
}
