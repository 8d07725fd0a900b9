//! Plain-text renderer for terminals.
//!
//! Panes are drawn one below the other. Selected days are wrapped in `[ ]`,
//! days inside a range in `( )`, today is marked with `*` and days of the
//! adjacent months are shown as `.`.

use std::fmt::Write;

use super::{CellState, PanePosition, Renderer};
use crate::models::month_view::MonthView;
use crate::models::selection::DayHighlight;

const CELL_WIDTH: usize = 5;

#[derive(Debug, Default)]
pub struct TextRenderer {
    output: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text drawn by the last render pass.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

fn cell_text(cell: &CellState) -> String {
    if !cell.in_current_month {
        return ".".to_string();
    }
    let today = if cell.is_today { "*" } else { "" };
    match cell.highlight {
        DayHighlight::Selected => format!("[{}{}]", cell.label, today),
        DayHighlight::InRange => format!("({}{})", cell.label, today),
        DayHighlight::None => format!("{}{}", cell.label, today),
    }
}

impl Renderer for TextRenderer {
    fn begin(&mut self, visible: bool) {
        self.output.clear();
        if !visible {
            self.output.push_str("(hidden)\n");
        }
    }

    fn pane(&mut self, position: PanePosition, view: &MonthView, cells: &[CellState]) {
        if matches!(position, PanePosition::Middle | PanePosition::Last) {
            self.output.push('\n');
        }
        let width = CELL_WIDTH * 7;
        let _ = writeln!(self.output, "{:^width$}", view.title, width = width);

        for label in &view.header {
            let _ = write!(self.output, "{:>w$}", label, w = CELL_WIDTH);
        }
        self.output.push('\n');

        for week in cells.chunks(7) {
            for cell in week {
                let _ = write!(self.output, "{:>w$}", cell_text(cell), w = CELL_WIDTH);
            }
            self.output.push('\n');
        }
    }

    fn finish(&mut self) {
        log::debug!("Rendered {} bytes of text", self.output.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(label: &str, highlight: DayHighlight, in_month: bool, today: bool) -> CellState {
        CellState {
            label: label.to_string(),
            timestamp: Some(0),
            in_current_month: in_month,
            is_today: today,
            is_first_week_day: false,
            highlight,
        }
    }

    #[test]
    fn test_cell_markers() {
        assert_eq!(cell_text(&cell("5", DayHighlight::Selected, true, false)), "[5]");
        assert_eq!(cell_text(&cell("6", DayHighlight::InRange, true, true)), "(6*)");
        assert_eq!(cell_text(&cell("7", DayHighlight::None, true, true)), "7*");
        assert_eq!(cell_text(&cell("30", DayHighlight::Selected, false, false)), ".");
    }

    #[test]
    fn test_hidden_picker_is_flagged() {
        let mut renderer = TextRenderer::new();
        renderer.begin(false);
        renderer.finish();
        assert_eq!(renderer.output(), "(hidden)\n");
    }
}
