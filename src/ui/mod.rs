// UI module exports
// The Renderer seam and the terminal renderer used by the binary

pub mod text;

use serde::Serialize;

use crate::models::month_view::MonthView;
use crate::models::selection::DayHighlight;

pub use text::TextRenderer;

/// Where a pane sits in a multi-pane picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanePosition {
    Only,
    First,
    Middle,
    Last,
}

impl PanePosition {
    pub fn of(index: usize, count: usize) -> Self {
        if count <= 1 {
            PanePosition::Only
        } else if index == 0 {
            PanePosition::First
        } else if index + 1 == count {
            PanePosition::Last
        } else {
            PanePosition::Middle
        }
    }
}

/// Everything a renderer needs to draw one day cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellState {
    /// Cell text, formatted with the day pattern.
    pub label: String,
    pub timestamp: Option<i64>,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_first_week_day: bool,
    pub highlight: DayHighlight,
}

/// Draws picker state. The picker calls `begin`, then `pane` once per pane
/// in display order, then `finish`.
#[cfg_attr(test, mockall::automock)]
pub trait Renderer {
    fn begin(&mut self, visible: bool);
    fn pane(&mut self, position: PanePosition, view: &MonthView, cells: &[CellState]);
    fn finish(&mut self);
}
