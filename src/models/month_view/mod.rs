// Month view models
// One pane of the picker and the day cells it shows

use crate::models::calendar_date::{CalendarDate, DateField};

/// Every pane shows six full weeks so panes keep a constant height.
pub const GRID_WEEKS: usize = 6;
pub const GRID_CELLS: usize = GRID_WEEKS * 7;

/// One day slot of a month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub date: CalendarDate,
    /// The day belongs to the month the pane displays.
    pub in_current_month: bool,
    pub is_today: bool,
    /// The day starts a grid row.
    pub is_first_week_day: bool,
}

impl GridCell {
    /// Epoch milliseconds of the day, the key used by the selection.
    pub fn timestamp(&self) -> Option<i64> {
        self.date.value_of()
    }
}

/// A month pane: its anchor (first of the month) and 42 cells.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    pub anchor: CalendarDate,
    pub cells: Vec<GridCell>,
    /// Anchor formatted with the title pattern.
    pub title: String,
    /// Seven weekday labels in grid column order.
    pub header: Vec<String>,
}

impl MonthView {
    /// 0-based month shown by this pane, `None` for an invalid anchor.
    pub fn month(&self) -> Option<i64> {
        self.anchor.get(DateField::Month)
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }

    /// Index of the in-month cell holding `timestamp`.
    pub fn position_of(&self, timestamp: i64) -> Option<usize> {
        self.cells
            .iter()
            .position(|cell| cell.in_current_month && cell.timestamp() == Some(timestamp))
    }
}
