//! Date construction.
//!
//! Everything above the engine builds dates through a [`DateFactory`], so a
//! different calendar engine can be plugged into a picker without touching
//! the grid, selection or navigation code.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::calendar_date::{CalendarDate, DateClock, NameTables};

/// Raw input a date can be built from.
#[derive(Debug, Clone)]
pub enum DateInput {
    /// The current instant.
    Now,
    /// Epoch milliseconds.
    Millis(i64),
    /// An ISO-8601, RFC 3339 or RFC 2822 string.
    Text(String),
    /// Midnight of a calendar day.
    Day(NaiveDate),
    /// An existing date, re-read through the factory's clock.
    Date(CalendarDate),
}

impl From<i64> for DateInput {
    fn from(millis: i64) -> Self {
        DateInput::Millis(millis)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(day: NaiveDate) -> Self {
        DateInput::Day(day)
    }
}

impl From<CalendarDate> for DateInput {
    fn from(date: CalendarDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&CalendarDate> for DateInput {
    fn from(date: &CalendarDate) -> Self {
        DateInput::Date(date.clone())
    }
}

impl<T: Into<DateInput>> From<Option<T>> for DateInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(DateInput::Now)
    }
}

/// Builds [`CalendarDate`]s from raw input.
pub trait DateFactory {
    fn construct(&self, raw: DateInput) -> CalendarDate;

    /// A date at midnight of the day `raw` falls on.
    fn stripped(&self, raw: DateInput) -> CalendarDate {
        let mut date = self.construct(raw);
        date.strip_time();
        date
    }
}

/// The built-in engine: parses input and reads fields through one clock.
#[derive(Debug, Clone, Default)]
pub struct DefaultDateFactory {
    clock: DateClock,
    names: Arc<NameTables>,
}

impl DefaultDateFactory {
    pub fn new(clock: DateClock, names: Arc<NameTables>) -> Self {
        Self { clock, names }
    }

    pub fn clock(&self) -> DateClock {
        self.clock
    }

    fn parse_text(&self, text: &str) -> Option<i64> {
        let text = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.timestamp_millis());
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
            return Some(dt.timestamp_millis());
        }

        // Strings without an offset are wall-clock times in this clock.
        const DATE_TIME_FORMATS: [&str; 4] = [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M",
        ];
        for format in DATE_TIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return self.clock.from_naive(naive);
            }
        }

        const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
        for format in DATE_FORMATS {
            if let Ok(day) = NaiveDate::parse_from_str(text, format) {
                return self.clock.from_naive(day.and_hms_opt(0, 0, 0)?);
            }
        }

        None
    }
}

impl DateFactory for DefaultDateFactory {
    fn construct(&self, raw: DateInput) -> CalendarDate {
        let millis = match raw {
            DateInput::Now => Some(Utc::now().timestamp_millis()),
            DateInput::Millis(millis) => Some(millis),
            DateInput::Text(ref text) => {
                let parsed = self.parse_text(text);
                if parsed.is_none() {
                    log::warn!("Unparseable date input {:?}, using invalid date", text);
                }
                parsed
            }
            DateInput::Day(day) => day
                .and_hms_opt(0, 0, 0)
                .and_then(|naive| self.clock.from_naive(naive)),
            DateInput::Date(date) => date.value_of(),
        };

        let date = match millis {
            Some(millis) => CalendarDate::from_millis(millis, self.clock),
            None => CalendarDate::invalid(self.clock),
        };
        date.with_names(Arc::clone(&self.names))
    }
}
