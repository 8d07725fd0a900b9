//! Month grid construction.
//!
//! A grid always starts on the configured first day of the week at or before
//! the last day of the previous month, and runs for exactly 42 days.

use crate::models::calendar_date::{CalendarDate, DateField};
use crate::models::month_view::{GridCell, GRID_CELLS};

/// Builds the 42-cell day sequence for a month pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBuilder {
    first_week_day: u8,
}

impl GridBuilder {
    /// `first_week_day`: 0 = Sunday, 1 = Monday, etc.
    pub fn new(first_week_day: u8) -> Self {
        Self {
            first_week_day: first_week_day % 7,
        }
    }

    pub fn first_week_day(&self) -> u8 {
        self.first_week_day
    }

    /// First date shown by the grid of `anchor`'s month.
    ///
    /// Day 0 of the anchor month is the last day of the previous month;
    /// from there the grid steps back to the nearest first week day, so at
    /// least one day of the previous month is always shown.
    pub fn grid_start(&self, anchor: &CalendarDate) -> CalendarDate {
        let mut start = anchor.clone();
        start.set(DateField::Date, 0).strip_time();
        if let Some(weekday) = start.get(DateField::Weekday) {
            let offset = (weekday - self.first_week_day as i64).rem_euclid(7);
            start.subtract(DateField::Date, offset);
        }
        start
    }

    /// The 42 cells of `anchor`'s month. `today` is the stripped-time
    /// timestamp to flag, if any.
    pub fn build(&self, anchor: &CalendarDate, today: Option<i64>) -> Vec<GridCell> {
        let month = anchor.get(DateField::Month);
        let mut cursor = self.grid_start(anchor);
        let mut cells = Vec::with_capacity(GRID_CELLS);

        for _ in 0..GRID_CELLS {
            let cell_month = cursor.get(DateField::Month);
            let value = cursor.value_of();
            cells.push(GridCell {
                date: cursor.clone(),
                in_current_month: cell_month.is_some() && cell_month == month,
                is_today: value.is_some() && value == today,
                is_first_week_day: cursor.get(DateField::Weekday)
                    == Some(self.first_week_day as i64),
            });
            // A zone can skip midnight; re-strip so later days don't keep the shift.
            cursor.add(DateField::Date, 1).strip_time();
        }

        log::debug!(
            "Built grid for {} starting {}",
            anchor.format("YYYY-MM"),
            cells.first().map(|c| c.date.to_string()).unwrap_or_default()
        );

        cells
    }
}
