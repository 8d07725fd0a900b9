//! Selection state machine.
//!
//! The controller keeps the selected days as stripped-time epoch
//! milliseconds and turns day clicks into selection changes according to
//! the active [`SelectionMode`]:
//!
//! - `single`: the clicked day replaces any previous selection.
//! - `multiple`: the clicked day is toggled in or out.
//! - `range`: a click with exactly one other day selected completes the
//!   range; any other click starts a new range at the clicked day.
//!
//! Every change fires a `select` event carrying the sorted selection.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::models::calendar_date::CalendarDate;
use crate::models::selection::{DayHighlight, SelectionMode};
use crate::services::date_engine::{DateFactory, DateInput};
use crate::services::events::{EventBus, PickerEvent, SelectionPayload};

pub struct SelectionController {
    mode: SelectionMode,
    /// Range mode keeps this in ascending order; other modes keep click order.
    selection: Vec<i64>,
    raw_events: bool,
    factory: Rc<dyn DateFactory>,
    events: Rc<EventBus>,
}

impl SelectionController {
    pub fn new(mode: SelectionMode, factory: Rc<dyn DateFactory>, events: Rc<EventBus>) -> Self {
        Self {
            mode,
            selection: Vec::new(),
            raw_events: false,
            factory,
            events,
        }
    }

    /// Send raw timestamps instead of dates in `select` events.
    pub fn with_raw_events(mut self, raw_events: bool) -> Self {
        self.raw_events = raw_events;
        self
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switches mode, reshaping the current selection for it.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        let mut current = self.snapshot();
        shape_for_mode(&mut current, mode);
        self.selection = current;
        self.commit();
    }

    fn normalize(&self, raw: DateInput) -> Option<i64> {
        self.factory.stripped(raw).value_of()
    }

    /// Applies a click on the day at `timestamp`.
    pub fn select_day(&mut self, timestamp: i64) {
        let Some(day) = self.normalize(DateInput::Millis(timestamp)) else {
            log::warn!("Ignoring click on unrepresentable timestamp {}", timestamp);
            return;
        };

        match self.mode {
            SelectionMode::Single => {
                self.selection.clear();
                self.selection.push(day);
            }
            SelectionMode::Multiple => {
                if let Some(index) = self.selection.iter().position(|&d| d == day) {
                    self.selection.remove(index);
                } else {
                    self.selection.push(day);
                }
            }
            SelectionMode::Range => match self.selection.as_slice() {
                &[start] if start != day => self.apply_range(start, day),
                // Nothing selected, a complete range, or the start clicked
                // again: begin a new range here.
                _ => {
                    self.selection.clear();
                    self.selection.push(day);
                }
            },
        }

        self.commit();
    }

    /// Selects the range between two days, in either order.
    pub fn select_range(&mut self, start: i64, end: i64) {
        let (Some(start), Some(end)) = (
            self.normalize(DateInput::Millis(start)),
            self.normalize(DateInput::Millis(end)),
        ) else {
            log::warn!("Ignoring range with unrepresentable end ({}, {})", start, end);
            return;
        };
        self.apply_range(start, end);
        self.commit();
    }

    fn apply_range(&mut self, start: i64, end: i64) {
        self.selection = match start.cmp(&end) {
            Ordering::Less => vec![start, end],
            Ordering::Equal => vec![start],
            Ordering::Greater => vec![end, start],
        };
    }

    /// Replaces the selection.
    ///
    /// Inputs are stripped to their day, invalid ones skipped and duplicates
    /// dropped; the result is sorted and cut down to what the mode holds.
    pub fn set_selection<I, T>(&mut self, dates: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<DateInput>,
    {
        let mut selection: Vec<i64> = Vec::new();
        for raw in dates {
            match self.normalize(raw.into()) {
                Some(day) if !selection.contains(&day) => selection.push(day),
                Some(_) => {}
                None => log::warn!("Dropping invalid date from selection"),
            }
        }
        selection.sort_unstable();
        shape_for_mode(&mut selection, self.mode);

        self.selection = selection;
        self.commit();
    }

    /// Unselects every day.
    pub fn clear(&mut self) {
        self.selection.clear();
        self.commit();
    }

    /// Sorted, deduplicated selected timestamps.
    pub fn snapshot(&self) -> Vec<i64> {
        let mut snapshot = self.selection.clone();
        snapshot.sort_unstable();
        snapshot.dedup();
        snapshot
    }

    /// Selected days as dates, in ascending order.
    pub fn selected_dates(&self) -> Vec<CalendarDate> {
        self.snapshot()
            .into_iter()
            .map(|stamp| self.factory.construct(DateInput::Millis(stamp)))
            .collect()
    }

    /// The selection as raw timestamps or wrapped dates.
    pub fn get_selection(&self, raw: bool) -> SelectionPayload {
        if raw {
            SelectionPayload::Raw(self.snapshot())
        } else {
            SelectionPayload::Dates(self.selected_dates())
        }
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn is_selected(&self, timestamp: i64) -> bool {
        self.selection.contains(&timestamp)
    }

    /// Ends of a complete range, in ascending order.
    pub fn range_bounds(&self) -> Option<(i64, i64)> {
        match (self.mode, self.selection.as_slice()) {
            (SelectionMode::Range, [start, end]) => Some((*start, *end)),
            _ => None,
        }
    }

    /// Highlight for the day cell at `timestamp`.
    pub fn highlight(&self, timestamp: i64) -> DayHighlight {
        if let Some((start, end)) = self.range_bounds() {
            if timestamp > start && timestamp < end {
                return DayHighlight::InRange;
            }
        }
        if self.is_selected(timestamp) {
            DayHighlight::Selected
        } else {
            DayHighlight::None
        }
    }

    fn commit(&self) {
        let payload = self.get_selection(self.raw_events);
        log::info!("Selection ({}) now holds {} day(s)", self.mode, payload.len());
        self.events.fire(&PickerEvent::Select(payload));
    }
}

fn shape_for_mode(selection: &mut Vec<i64>, mode: SelectionMode) {
    if let Some(capacity) = mode.capacity() {
        selection.truncate(capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar_date::DateClock;
    use crate::services::date_engine::DefaultDateFactory;
    use crate::services::events::EventKind;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    const DAY: i64 = 86_400_000;
    // 2024-01-01T00:00:00Z
    const JAN_1: i64 = 1_704_067_200_000;

    fn day(n: i64) -> i64 {
        JAN_1 + (n - 1) * DAY
    }

    fn controller(mode: SelectionMode) -> (SelectionController, Rc<RefCell<Vec<SelectionPayload>>>) {
        let events = Rc::new(EventBus::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        events.on(EventKind::Select, move |event| {
            if let PickerEvent::Select(payload) = event {
                sink.borrow_mut().push(payload.clone());
            }
        });
        let factory: Rc<dyn DateFactory> = Rc::new(DefaultDateFactory::default());
        (
            SelectionController::new(mode, factory, events).with_raw_events(true),
            seen,
        )
    }

    #[test]
    fn test_single_replaces_previous_day() {
        let (mut ctl, _) = controller(SelectionMode::Single);
        ctl.select_day(day(3));
        ctl.select_day(day(9));
        assert_eq!(ctl.snapshot(), vec![day(9)]);
    }

    #[test]
    fn test_multiple_toggles_membership() {
        let (mut ctl, _) = controller(SelectionMode::Multiple);
        ctl.select_day(day(3));
        ctl.select_day(day(9));
        ctl.select_day(day(3));
        assert_eq!(ctl.snapshot(), vec![day(9)]);
    }

    #[test]
    fn test_multiple_snapshot_is_sorted() {
        let (mut ctl, _) = controller(SelectionMode::Multiple);
        for n in [20, 4, 11] {
            ctl.select_day(day(n));
        }
        assert_eq!(ctl.snapshot(), vec![day(4), day(11), day(20)]);
    }

    #[test]
    fn test_range_is_stored_in_order() {
        let (mut ctl, _) = controller(SelectionMode::Range);
        ctl.select_day(day(10));
        ctl.select_day(day(5));
        assert_eq!(ctl.snapshot(), vec![day(5), day(10)]);
        assert_eq!(ctl.range_bounds(), Some((day(5), day(10))));
    }

    #[test]
    fn test_range_within_one_day_keeps_a_single_member() {
        let (mut ctl, _) = controller(SelectionMode::Range);
        ctl.select_range(JAN_1, JAN_1 + 3_600_000);
        assert_eq!(ctl.len(), 1);
        assert_eq!(ctl.snapshot(), vec![JAN_1]);
        assert_eq!(ctl.range_bounds(), None);
        assert_eq!(ctl.highlight(JAN_1), DayHighlight::Selected);
    }

    #[test]
    fn test_range_third_click_restarts() {
        let (mut ctl, _) = controller(SelectionMode::Range);
        ctl.select_day(day(5));
        ctl.select_day(day(10));
        ctl.select_day(day(20));
        assert_eq!(ctl.snapshot(), vec![day(20)]);
    }

    #[test]
    fn test_range_reclicking_start_keeps_single_start() {
        let (mut ctl, _) = controller(SelectionMode::Range);
        ctl.select_day(day(5));
        ctl.select_day(day(5));
        assert_eq!(ctl.snapshot(), vec![day(5)]);
    }

    #[test]
    fn test_range_reclicking_endpoint_restarts_at_it() {
        let (mut ctl, _) = controller(SelectionMode::Range);
        ctl.select_day(day(5));
        ctl.select_day(day(10));
        ctl.select_day(day(10));
        assert_eq!(ctl.snapshot(), vec![day(10)]);
    }

    #[test]
    fn test_clicks_are_stripped_to_the_day() {
        let (mut ctl, _) = controller(SelectionMode::Multiple);
        ctl.select_day(day(3) + 13 * 3_600_000);
        ctl.select_day(day(3) + 60_000);
        assert!(ctl.is_empty());
    }

    #[test]
    fn test_highlight_in_range() {
        let (mut ctl, _) = controller(SelectionMode::Range);
        ctl.select_range(day(12), day(8));
        assert_eq!(ctl.highlight(day(8)), DayHighlight::Selected);
        assert_eq!(ctl.highlight(day(10)), DayHighlight::InRange);
        assert_eq!(ctl.highlight(day(12)), DayHighlight::Selected);
        assert_eq!(ctl.highlight(day(13)), DayHighlight::None);
    }

    #[test]
    fn test_set_selection_dedups_sorts_and_shapes() {
        let (mut ctl, _) = controller(SelectionMode::Range);
        ctl.set_selection([day(9), day(2), day(9) + 5_000, day(30)]);
        assert_eq!(ctl.snapshot(), vec![day(2), day(9)]);

        let (mut single, _) = controller(SelectionMode::Single);
        single.set_selection(["2024-01-15", "2024-01-03"]);
        assert_eq!(single.snapshot(), vec![day(3)]);

        let (mut multi, _) = controller(SelectionMode::Multiple);
        multi.set_selection(["2024-01-15", "garbage", "2024-01-03", "2024-01-15"]);
        assert_eq!(multi.snapshot(), vec![day(3), day(15)]);
    }

    #[test]
    fn test_sort_is_numeric() {
        // An 11-digit timestamp sorts after a 12-digit one as text.
        let (mut ctl, _) = controller(SelectionMode::Multiple);
        ctl.set_selection([200_000_000_000_i64, 90_000_000_000]);
        let snapshot = ctl.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot[0] < 100_000_000_000);
        assert!(snapshot[1] > 100_000_000_000);
    }

    #[test]
    fn test_empty_set_selection_clears_and_notifies() {
        let (mut ctl, seen) = controller(SelectionMode::Multiple);
        ctl.select_day(day(1));
        ctl.set_selection(Vec::<i64>::new());
        assert!(ctl.is_empty());
        let events = seen.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], SelectionPayload::Raw(vec![]));
    }

    #[test]
    fn test_every_click_notifies_with_snapshot() {
        let (mut ctl, seen) = controller(SelectionMode::Range);
        ctl.select_day(day(10));
        ctl.select_day(day(5));
        assert_eq!(
            *seen.borrow(),
            vec![
                SelectionPayload::Raw(vec![day(10)]),
                SelectionPayload::Raw(vec![day(5), day(10)]),
            ]
        );
    }

    #[test]
    fn test_date_payload_by_default() {
        let events = Rc::new(EventBus::new());
        let factory: Rc<dyn DateFactory> =
            Rc::new(DefaultDateFactory::new(DateClock::Utc, Default::default()));
        let mut ctl = SelectionController::new(SelectionMode::Single, factory, events);
        ctl.select_day(day(5));
        match ctl.get_selection(false) {
            SelectionPayload::Dates(dates) => {
                assert_eq!(dates.len(), 1);
                assert_eq!(dates[0].format("YYYY-MM-DD"), "2024-01-05");
            }
            other => panic!("expected dates, got {:?}", other),
        }
    }

    #[test]
    fn test_set_mode_reshapes_selection() {
        let (mut ctl, seen) = controller(SelectionMode::Multiple);
        ctl.set_selection([day(7), day(3), day(5)]);
        ctl.set_mode(SelectionMode::Range);
        assert_eq!(ctl.snapshot(), vec![day(3), day(5)]);
        ctl.set_mode(SelectionMode::Single);
        assert_eq!(ctl.snapshot(), vec![day(3)]);
        assert_eq!(seen.borrow().len(), 3);
    }
}
