//! Date picker facade.
//!
//! [`DatePicker`] owns the panes and the selection of one picker and is the
//! surface a renderer talks to: it routes day clicks and navigation in,
//! exposes grid and selection state, and fires `select`, `show` and `hide`
//! events.

use std::rc::Rc;

use crate::models::calendar_date::CalendarDate;
use crate::models::month_view::MonthView;
use crate::models::selection::SelectionMode;
use crate::models::settings::{PickerSettings, SettingsValidationError};
use crate::services::calendar_set::{CalendarSet, NavDirection, NavUnit};
use crate::services::date_engine::{DateFactory, DateInput, DefaultDateFactory};
use crate::services::events::{EventBus, EventKind, ListenerId, PickerEvent, SelectionPayload};
use crate::services::grid::GridBuilder;
use crate::services::selection::SelectionController;
use crate::ui::{CellState, PanePosition, Renderer};

pub struct DatePicker {
    settings: PickerSettings,
    factory: Rc<dyn DateFactory>,
    events: Rc<EventBus>,
    selection: SelectionController,
    calendars: CalendarSet,
    today: Option<i64>,
    visible: bool,
}

impl DatePicker {
    /// A picker using the built-in date engine, with today read from the
    /// system clock once.
    pub fn new(settings: PickerSettings) -> Result<Self, SettingsValidationError> {
        settings.validate()?;
        let factory: Rc<dyn DateFactory> = Rc::new(DefaultDateFactory::new(
            settings.clock,
            settings.name_tables(),
        ));
        Self::with_factory(settings, factory, None)
    }

    /// A picker using `factory` to build every date. `today` overrides the
    /// system clock for the today highlight and the default opening month.
    pub fn with_factory(
        settings: PickerSettings,
        factory: Rc<dyn DateFactory>,
        today: Option<CalendarDate>,
    ) -> Result<Self, SettingsValidationError> {
        settings.validate()?;

        let today_date = factory.stripped(match today {
            Some(date) => DateInput::Date(date),
            None => DateInput::Now,
        });
        let today = if settings.highlight_today {
            today_date.value_of()
        } else {
            None
        };

        let base = match settings.date {
            Some(ref text) => {
                let base = factory.stripped(DateInput::Text(text.clone()));
                if !base.is_valid() {
                    log::warn!("Configured start date {:?} is invalid", text);
                }
                base
            }
            None => today_date,
        };

        let events = Rc::new(EventBus::new());
        let selection =
            SelectionController::new(settings.mode, Rc::clone(&factory), Rc::clone(&events))
                .with_raw_events(settings.raw_select_events);
        let calendars = CalendarSet::new(
            &base,
            settings.calendars,
            GridBuilder::new(settings.first_week_day),
            settings.formats.clone(),
            today,
        );

        log::info!(
            "Created {} picker with {} pane(s) starting {}",
            settings.mode,
            calendars.len(),
            base.format("YYYY-MM")
        );

        Ok(Self {
            visible: settings.visible,
            settings,
            factory,
            events,
            selection,
            calendars,
            today,
        })
    }

    pub fn settings(&self) -> &PickerSettings {
        &self.settings
    }

    pub fn factory(&self) -> &Rc<dyn DateFactory> {
        &self.factory
    }

    /// Stripped-time timestamp of today, `None` when not highlighted.
    pub fn today(&self) -> Option<i64> {
        self.today
    }

    pub fn on(&self, kind: EventKind, handler: impl FnMut(&PickerEvent) + 'static) -> ListenerId {
        self.events.on(kind, handler)
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// A click on the day at `timestamp`.
    pub fn on_day_click(&mut self, timestamp: i64) {
        self.selection.select_day(timestamp);
    }

    /// A click on cell `index` of pane `pane`. Days of adjacent months are
    /// not selectable; returns whether the click selected anything.
    pub fn on_cell_click(&mut self, pane: usize, index: usize) -> bool {
        let Some(cell) = self.calendars.pane(pane).and_then(|p| p.cells.get(index)) else {
            log::warn!("Click outside the grid (pane {}, cell {})", pane, index);
            return false;
        };
        match (cell.in_current_month, cell.timestamp()) {
            (true, Some(timestamp)) => {
                self.on_day_click(timestamp);
                true
            }
            _ => false,
        }
    }

    pub fn on_navigate(&mut self, unit: NavUnit, direction: NavDirection) {
        self.calendars.advance(unit, direction.delta());
    }

    /// Moves the first pane to the month of `date`.
    pub fn go_to(&mut self, date: impl Into<DateInput>) {
        let base = self.factory.stripped(date.into());
        self.calendars.reset_to(&base);
    }

    pub fn current_grids(&self) -> &[MonthView] {
        self.calendars.panes()
    }

    pub fn calendars(&self) -> &CalendarSet {
        &self.calendars
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn current_selection(&self, raw: bool) -> SelectionPayload {
        self.selection.get_selection(raw)
    }

    pub fn set_selection<I, T>(&mut self, dates: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<DateInput>,
    {
        self.selection.set_selection(dates);
        self.calendars.refresh();
    }

    pub fn select_range(&mut self, start: i64, end: i64) {
        self.selection.select_range(start, end);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.settings.mode = mode;
        self.selection.set_mode(mode);
    }

    /// Display state of every cell in pane `pane`.
    pub fn cell_states(&self, pane: usize) -> Vec<CellState> {
        let Some(view) = self.calendars.pane(pane) else {
            return Vec::new();
        };
        let day_format = &self.calendars.formats().day;
        view.cells
            .iter()
            .map(|cell| CellState {
                label: cell.date.format(day_format),
                timestamp: cell.timestamp(),
                in_current_month: cell.in_current_month,
                is_today: cell.is_today,
                is_first_week_day: cell.is_first_week_day,
                highlight: cell
                    .timestamp()
                    .map(|stamp| self.selection.highlight(stamp))
                    .unwrap_or_default(),
            })
            .collect()
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.begin(self.visible);
        let count = self.calendars.len();
        for (index, view) in self.calendars.panes().iter().enumerate() {
            let cells = self.cell_states(index);
            renderer.pane(PanePosition::of(index, count), view, &cells);
        }
        renderer.finish();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            self.events.fire(&PickerEvent::Show);
        }
    }

    pub fn hide(&mut self) {
        if self.visible {
            self.visible = false;
            self.events.fire(&PickerEvent::Hide);
        }
    }

    pub fn toggle(&mut self) {
        if self.visible {
            self.hide();
        } else {
            self.show();
        }
    }
}
