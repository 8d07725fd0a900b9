// Test fixtures - reusable test data
// Provides consistent dates and pickers across all test files

#![allow(dead_code)]

use std::rc::Rc;

use rust_datepicker::{
    CalendarDate, DateClock, DateFactory, DateInput, DatePicker, DefaultDateFactory,
    PickerSettings, SelectionMode,
};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, Jan 10, 2024 at 09:15 UTC
    pub fn mid_january_2024() -> CalendarDate {
        factory().construct("2024-01-10T09:15:00Z".into())
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> CalendarDate {
        CalendarDate::from_fields(DateClock::Utc, 2024, 1, 29)
    }

    /// Dec 31, 2025
    pub fn new_years_eve_2025() -> CalendarDate {
        CalendarDate::from_fields(DateClock::Utc, 2025, 11, 31)
    }

    /// Midnight UTC timestamp of a civil day
    pub fn day(text: &str) -> i64 {
        factory()
            .stripped(DateInput::from(text))
            .value_of()
            .unwrap_or_else(|| panic!("fixture date {} is invalid", text))
    }
}

pub fn factory() -> Rc<dyn DateFactory> {
    Rc::new(DefaultDateFactory::default())
}

/// Picker opening on January 2024, with today pinned to Jan 10, 2024
pub fn picker(mode: SelectionMode, calendars: usize) -> DatePicker {
    let settings = PickerSettings {
        mode,
        calendars,
        date: Some("2024-01-01".to_string()),
        ..Default::default()
    };
    picker_with(settings)
}

pub fn picker_with(settings: PickerSettings) -> DatePicker {
    DatePicker::with_factory(settings, factory(), Some(dates::mid_january_2024()))
        .expect("fixture settings are valid")
}
