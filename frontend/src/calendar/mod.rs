//! # Calendar Module
//!
//! The calendar view engine: month grid construction, the per-day event
//! index, attendance updates, the month/week view state machine and
//! navigation. [`controller::CalendarController`] ties them together for a
//! host UI.

pub mod anchor;
pub mod attendance;
pub mod controller;
pub mod event_index;
pub mod month_grid;
pub mod navigator;
pub mod presentation;
pub mod view_mode;

pub use anchor::{CalendarAnchor, MonthWindow};
pub use attendance::{AttendanceFailure, AttendanceMutator, AttendanceOutcome, AttendanceSnapshot};
pub use controller::{CalendarCallbacks, CalendarController, FetchCommit, FetchTicket};
pub use event_index::{EventStore, EventsByDate};
pub use month_grid::{DayCell, MonthGrid, WeekRow};
pub use navigator::{NavigationOutcome, Navigator, SelectionChange, WeekTarget};
pub use presentation::{BoardDirectory, DaySummary, EventCard, MonthSummary};
pub use view_mode::{GridMetrics, SnapOutcome, ViewMode, ViewState};
