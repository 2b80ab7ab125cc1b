//! # View-Mode State Machine
//!
//! The calendar is either a full month grid or a single week row. A vertical
//! drag on the handle moves the grid height continuously between the two; on
//! release the height snaps to whichever end is closer (the snap threshold
//! is the midpoint of the week-row and month-grid heights) and the mode
//! follows.
//!
//! Continuous and discrete state live side by side in [`ViewState`]:
//! - `committed_height_px` is the resting height of the current mode
//! - `drag_height_px` only exists while `is_dragging` and always lies in
//!   `[week_row_height, month_grid_height]`
//! - `active_week_index` is always a valid row index
//! - `selected_date` is cleared whenever the view returns to month mode

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::month_grid::MonthGrid;
use crate::config::DEFAULT_WEEK_ROW_HEIGHT_PX;

/// Smallest row height accepted from a measurement
const MIN_ROW_HEIGHT_PX: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    Month,
    Week,
}

/// Measured geometry of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    week_row_height_px: f32,
    row_count: usize,
}

impl GridMetrics {
    /// Metrics for a measured row height, falling back to the default row height
    /// when the measurement is unusable
    pub fn new(week_row_height_px: f32, row_count: usize) -> Self {
        Self::measured(week_row_height_px, DEFAULT_WEEK_ROW_HEIGHT_PX, row_count)
    }

    /// Metrics for a measured row height; zero, negative or non-finite
    /// measurements are replaced by `fallback_px`
    pub fn measured(week_row_height_px: f32, fallback_px: f32, row_count: usize) -> Self {
        let usable = |value: f32| value.is_finite() && value >= MIN_ROW_HEIGHT_PX;

        let week_row_height_px = if usable(week_row_height_px) {
            week_row_height_px
        } else if usable(fallback_px) {
            warn!("⚠️ Ignoring row height measurement {}, using {}", week_row_height_px, fallback_px);
            fallback_px
        } else {
            DEFAULT_WEEK_ROW_HEIGHT_PX
        };

        Self {
            week_row_height_px,
            row_count: row_count.max(1),
        }
    }

    pub fn week_row_height(&self) -> f32 {
        self.week_row_height_px
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn month_grid_height(&self) -> f32 {
        self.week_row_height_px * self.row_count as f32
    }

    /// Midpoint between the week and month heights
    pub fn snap_threshold(&self) -> f32 {
        (self.month_grid_height() + self.week_row_height()) / 2.0
    }

    /// Clamp a height into `[week_row_height, month_grid_height]`
    pub fn clamp_height(&self, height_px: f32) -> f32 {
        if height_px.is_nan() {
            return self.month_grid_height();
        }
        height_px.clamp(self.week_row_height(), self.month_grid_height())
    }

    /// Resting height of a mode
    pub fn height_for(&self, mode: ViewMode) -> f32 {
        match mode {
            ViewMode::Month => self.month_grid_height(),
            ViewMode::Week => self.week_row_height(),
        }
    }

    /// Same measurement for a grid with a different number of rows
    pub fn with_row_count(&self, row_count: usize) -> Self {
        Self {
            week_row_height_px: self.week_row_height_px,
            row_count: row_count.max(1),
        }
    }
}

/// Where a drag started
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragOrigin {
    pointer_y: f32,
    height_px: f32,
}

/// Result of releasing the drag handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOutcome {
    pub previous_mode: ViewMode,
    pub mode: ViewMode,
    pub height_px: f32,
    /// The selection was dropped because the view returned to month mode
    pub selection_cleared: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub(super) mode: ViewMode,
    pub(super) committed_height_px: f32,
    pub(super) drag_height_px: Option<f32>,
    pub(super) active_week_index: usize,
    pub(super) selected_date: Option<NaiveDate>,
    pub(super) is_dragging: bool,
    drag_origin: Option<DragOrigin>,
}

impl ViewState {
    /// Initial state: month mode, first row active, full month height
    pub fn new(metrics: &GridMetrics) -> Self {
        Self {
            mode: ViewMode::Month,
            committed_height_px: metrics.month_grid_height(),
            drag_height_px: None,
            active_week_index: 0,
            selected_date: None,
            is_dragging: false,
            drag_origin: None,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn committed_height_px(&self) -> f32 {
        self.committed_height_px
    }

    pub fn drag_height_px(&self) -> Option<f32> {
        self.drag_height_px
    }

    pub fn active_week_index(&self) -> usize {
        self.active_week_index
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Height to render right now
    pub fn current_height_px(&self) -> f32 {
        self.drag_height_px.unwrap_or(self.committed_height_px)
    }

    /// Begin a drag on the handle. Valid from either mode.
    pub fn drag_start(&mut self, pointer_y: f32) -> bool {
        if !pointer_y.is_finite() {
            warn!("⚠️ Ignoring drag start at non-finite position {}", pointer_y);
            return false;
        }
        if self.is_dragging {
            debug!("Drag already in progress, restarting from y={}", pointer_y);
        }

        let height_px = self.current_height_px();
        self.drag_origin = Some(DragOrigin { pointer_y, height_px });
        self.drag_height_px = Some(height_px);
        self.is_dragging = true;
        debug!("Drag started at y={} from height {}", pointer_y, height_px);
        true
    }

    /// Follow the pointer; returns the new drag height. No mode change happens here.
    pub fn drag_move(&mut self, pointer_y: f32, metrics: &GridMetrics) -> Option<f32> {
        let origin = self.drag_origin.filter(|_| self.is_dragging)?;
        if !pointer_y.is_finite() {
            return self.drag_height_px;
        }

        let delta = pointer_y - origin.pointer_y;
        let height_px = metrics.clamp_height(origin.height_px + delta);
        self.drag_height_px = Some(height_px);
        Some(height_px)
    }

    /// Release the handle and snap to week or month mode
    pub fn drag_end(&mut self, metrics: &GridMetrics, grid: &MonthGrid, today: NaiveDate) -> Option<SnapOutcome> {
        if !self.is_dragging {
            return None;
        }

        let height_px = metrics.clamp_height(self.current_height_px());
        let threshold = metrics.snap_threshold();
        let previous_mode = self.mode;

        self.is_dragging = false;
        self.drag_height_px = None;
        self.drag_origin = None;

        let target = if height_px < threshold {
            ViewMode::Week
        } else {
            ViewMode::Month
        };
        let selection_cleared = self.set_mode(target, metrics, grid, today);

        info!(
            "📅 Drag released at {:.1}px (threshold {:.1}px): {:?} -> {:?}",
            height_px, threshold, previous_mode, self.mode
        );

        Some(SnapOutcome {
            previous_mode,
            mode: self.mode,
            height_px: self.committed_height_px,
            selection_cleared,
        })
    }

    /// Drop an in-progress drag without snapping
    pub fn cancel_drag(&mut self) -> bool {
        if !self.is_dragging {
            return false;
        }
        self.is_dragging = false;
        self.drag_height_px = None;
        self.drag_origin = None;
        true
    }

    /// Switch mode and settle at its resting height.
    /// Returns true when a selected date was cleared.
    pub fn set_mode(&mut self, mode: ViewMode, metrics: &GridMetrics, grid: &MonthGrid, today: NaiveDate) -> bool {
        self.mode = mode;
        self.committed_height_px = metrics.height_for(mode);

        match mode {
            ViewMode::Week => {
                self.active_week_index = self.week_index_for(grid, today);
                false
            }
            ViewMode::Month => self.selected_date.take().is_some(),
        }
    }

    /// Row to show when entering week mode: the selected date's row, else today's,
    /// else the current row
    fn week_index_for(&self, grid: &MonthGrid, today: NaiveDate) -> usize {
        self.selected_date
            .and_then(|date| grid.row_of(date))
            .or_else(|| grid.row_of(today))
            .unwrap_or(self.active_week_index)
            .min(grid.last_row_index())
    }

    /// Re-apply invariants after the grid changed shape or the row height was re-measured
    pub fn sync_to_grid(&mut self, metrics: &GridMetrics, grid: &MonthGrid) {
        let last_row = grid.last_row_index();
        if self.active_week_index > last_row {
            debug!("Clamping active week {} to {}", self.active_week_index, last_row);
            self.active_week_index = last_row;
        }

        if self.is_dragging {
            self.drag_height_px = self.drag_height_px.map(|height| metrics.clamp_height(height));
        } else {
            self.committed_height_px = metrics.height_for(self.mode);
        }
    }
}
