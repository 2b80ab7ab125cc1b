//! # Month Grid Builder
//!
//! Turns an anchor month into week rows of day cells. Day 1 sits in the
//! column of its weekday (Sunday first); cells before it and after the last
//! day are blank so every row holds exactly seven cells.
//!
//! The builder is pure: the same anchor always yields the same rows.

use chrono::NaiveDate;
use log::debug;

use super::anchor::CalendarAnchor;
use crate::services::date_utils;

pub const DAYS_PER_WEEK: usize = 7;

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    /// Padding before day 1 or after the last day (not interactive)
    Blank,
    /// A day of the anchor month
    Day(NaiveDate),
}

impl DayCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DayCell::Blank => None,
            DayCell::Day(date) => Some(*date),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, DayCell::Blank)
    }
}

/// Seven consecutive cells, Sunday to Saturday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    cells: [DayCell; DAYS_PER_WEEK],
}

impl WeekRow {
    pub fn cells(&self) -> &[DayCell; DAYS_PER_WEEK] {
        &self.cells
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days().any(|day| day == date)
    }

    /// Non-blank dates of the row, in column order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().filter_map(DayCell::date)
    }
}

/// The rows of one anchor month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    anchor: CalendarAnchor,
    rows: Vec<WeekRow>,
}

impl MonthGrid {
    /// Build the grid for `anchor`
    pub fn build(anchor: CalendarAnchor) -> Self {
        let days_in_month = anchor.days_in_month();
        let first_column = date_utils::weekday_column(anchor.first_day());

        let mut cells = Vec::with_capacity(DAYS_PER_WEEK * 6);

        // Empty cells for days before the first day of month
        cells.extend(std::iter::repeat(DayCell::Blank).take(first_column));

        cells.extend(
            anchor
                .first_day()
                .iter_days()
                .take(days_in_month as usize)
                .map(DayCell::Day),
        );

        // Pad the final partial row
        while cells.len() % DAYS_PER_WEEK != 0 {
            cells.push(DayCell::Blank);
        }

        let rows: Vec<WeekRow> = cells
            .chunks(DAYS_PER_WEEK)
            .map(|chunk| {
                let mut row = [DayCell::Blank; DAYS_PER_WEEK];
                row[..chunk.len()].copy_from_slice(chunk);
                WeekRow { cells: row }
            })
            .collect();

        debug!(
            "🗓️ Built grid for {}: {} days starting in column {}, {} rows",
            anchor, days_in_month, first_column, rows.len()
        );

        Self { anchor, rows }
    }

    pub fn anchor(&self) -> CalendarAnchor {
        self.anchor
    }

    pub fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&WeekRow> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the last row; a grid always has at least four rows
    pub fn last_row_index(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Row holding `date`, if the date belongs to this month
    pub fn row_of(&self, date: NaiveDate) -> Option<usize> {
        if !self.anchor.contains(date) {
            return None;
        }
        self.rows.iter().position(|row| row.contains(date))
    }

    /// All days of the month in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().flat_map(|row| row.days())
    }
}
