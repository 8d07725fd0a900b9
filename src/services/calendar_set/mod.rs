//! The set of month panes shown side by side.
//!
//! Pane `i` always shows the month `i` months after the first pane; the
//! panes move together when navigating.

use std::fmt;
use std::str::FromStr;

use crate::models::calendar_date::{CalendarDate, DateError, DateField};
use crate::models::month_view::MonthView;
use crate::models::settings::PaneFormats;
use crate::services::grid::GridBuilder;

/// Step size for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavUnit {
    Months,
    Years,
}

impl NavUnit {
    pub fn field(self) -> DateField {
        match self {
            NavUnit::Months => DateField::Month,
            NavUnit::Years => DateField::Year,
        }
    }
}

impl FromStr for NavUnit {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" | "months" => Ok(NavUnit::Months),
            "year" | "years" => Ok(NavUnit::Years),
            other => Err(DateError::UnknownUnit(other.to_string())),
        }
    }
}

impl fmt::Display for NavUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavUnit::Months => write!(f, "months"),
            NavUnit::Years => write!(f, "years"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Previous,
    Next,
}

impl NavDirection {
    pub fn delta(self) -> i64 {
        match self {
            NavDirection::Previous => -1,
            NavDirection::Next => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarSet {
    panes: Vec<MonthView>,
    builder: GridBuilder,
    formats: PaneFormats,
    today: Option<i64>,
}

impl CalendarSet {
    /// `count` panes starting at the month of `base`. `today` is the
    /// stripped-time timestamp flagged in the grids.
    pub fn new(
        base: &CalendarDate,
        count: usize,
        builder: GridBuilder,
        formats: PaneFormats,
        today: Option<i64>,
    ) -> Self {
        let mut set = Self {
            panes: Vec::with_capacity(count),
            builder,
            formats,
            today,
        };
        set.seed(base, count.max(1));
        set
    }

    fn seed(&mut self, base: &CalendarDate, count: usize) {
        let mut anchor = base.clone();
        anchor.set(DateField::Date, 1).strip_time();

        self.panes = (0..count)
            .map(|_| {
                let view = self.build_view(anchor.clone());
                anchor.add(DateField::Month, 1);
                view
            })
            .collect();
    }

    /// Rebuilds every pane at the month of `base`, keeping the pane count.
    pub fn reset_to(&mut self, base: &CalendarDate) {
        let count = self.panes.len();
        self.seed(base, count);
    }

    fn build_view(&self, anchor: CalendarDate) -> MonthView {
        let cells = self.builder.build(&anchor, self.today);
        let header = cells
            .iter()
            .take(7)
            .map(|cell| cell.date.format(&self.formats.header_day))
            .collect();
        MonthView {
            title: anchor.format(&self.formats.title_date),
            anchor,
            cells,
            header,
        }
    }

    /// Moves every pane by `delta` units and rebuilds the grids.
    pub fn advance(&mut self, unit: NavUnit, delta: i64) {
        log::debug!("Navigating {} {}", delta, unit);
        for pane in &mut self.panes {
            pane.anchor.add(unit.field(), delta);
        }
        self.refresh();
    }

    /// Rebuilds every pane from its current anchor.
    pub fn refresh(&mut self) {
        let anchors: Vec<CalendarDate> = self.panes.iter().map(|p| p.anchor.clone()).collect();
        self.panes = anchors
            .into_iter()
            .map(|anchor| self.build_view(anchor))
            .collect();
    }

    pub fn panes(&self) -> &[MonthView] {
        &self.panes
    }

    pub fn pane(&self, index: usize) -> Option<&MonthView> {
        self.panes.get(index)
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    /// The pane displaying the 0-based `month`.
    pub fn pane_for_month(&self, month: i64) -> Option<&MonthView> {
        self.panes.iter().find(|pane| pane.month() == Some(month))
    }

    pub fn formats(&self) -> &PaneFormats {
        &self.formats
    }

    pub fn first_week_day(&self) -> u8 {
        self.builder.first_week_day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar_date::DateClock;
    use pretty_assertions::assert_eq;

    fn set(y: i64, m: i64, d: i64, count: usize) -> CalendarSet {
        let base = CalendarDate::from_fields(DateClock::Utc, y, m - 1, d);
        CalendarSet::new(&base, count, GridBuilder::new(0), PaneFormats::default(), None)
    }

    fn titles(set: &CalendarSet) -> Vec<String> {
        set.panes().iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_panes_are_consecutive_months() {
        let set = set(2023, 11, 17, 3);
        assert_eq!(
            titles(&set),
            vec!["November, 2023", "December, 2023", "January, 2024"]
        );
        assert!(set
            .panes()
            .iter()
            .all(|p| p.anchor.get(DateField::Date) == Some(1)));
    }

    #[test]
    fn test_base_on_month_end_does_not_skip_months() {
        let set = set(2023, 1, 31, 2);
        assert_eq!(titles(&set), vec!["January, 2023", "February, 2023"]);
    }

    #[test]
    fn test_advance_months_moves_all_panes() {
        let mut set = set(2023, 12, 1, 2);
        set.advance(NavUnit::Months, 1);
        assert_eq!(titles(&set), vec!["January, 2024", "February, 2024"]);
        set.advance(NavUnit::Months, -2);
        assert_eq!(titles(&set), vec!["November, 2023", "December, 2023"]);
    }

    #[test]
    fn test_advance_years() {
        let mut set = set(2024, 2, 1, 1);
        set.advance(NavUnit::Years, -1);
        assert_eq!(titles(&set), vec!["February, 2023"]);
        assert_eq!(
            set.pane(0).unwrap().cells.iter().filter(|c| c.in_current_month).count(),
            28
        );
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut set = set(2022, 6, 1, 2);
        set.refresh();
        let first = set.panes().to_vec();
        set.refresh();
        assert_eq!(set.panes(), first.as_slice());
    }

    #[test]
    fn test_header_starts_at_first_week_day() {
        let base = CalendarDate::from_fields(DateClock::Utc, 2022, 5, 1);
        let set = CalendarSet::new(&base, 1, GridBuilder::new(1), PaneFormats::default(), None);
        assert_eq!(
            set.pane(0).unwrap().header,
            vec!["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
        );
    }

    #[test]
    fn test_pane_for_month() {
        let set = set(2023, 11, 1, 2);
        assert_eq!(set.pane_for_month(11).unwrap().title, "December, 2023");
        assert!(set.pane_for_month(0).is_none());
    }

    #[test]
    fn test_invalid_base_degrades_panes() {
        let base = CalendarDate::invalid(DateClock::Utc);
        let set = CalendarSet::new(&base, 2, GridBuilder::new(0), PaneFormats::default(), None);
        assert_eq!(set.len(), 2);
        assert_eq!(set.pane(0).unwrap().title, "Invalid Date");
    }

    #[test]
    fn test_nav_unit_names() {
        assert_eq!("years".parse::<NavUnit>(), Ok(NavUnit::Years));
        assert!("weeks".parse::<NavUnit>().is_err());
    }
}
