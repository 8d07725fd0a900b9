//! Calendar date engine.
//!
//! A [`CalendarDate`] is an epoch instant read through a [`DateClock`]. Field
//! access goes through [`DateField`]; setters carry overflow into the next
//! field the way civil calendars do, so setting day 32 of January lands on
//! February 1st and day 0 lands on the last day of the previous month.
//!
//! Dates built from unparseable input are *invalid*: every field read returns
//! `None`, arithmetic keeps them invalid, they never compare equal or ordered,
//! and they format as `Invalid Date`.

mod clock;
mod field;
mod format;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::{Months, NaiveDateTime};
use thiserror::Error;

pub use clock::DateClock;
pub use field::DateField;
pub use format::NameTables;

use field::CivilParts;

/// Rendered in place of a formatted invalid date.
pub const INVALID_DATE: &str = "Invalid Date";

/// Errors raised when naming fields, units, clocks or modes from strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("unknown date field '{0}'")]
    UnknownField(String),
    #[error("unknown navigation unit '{0}' (expected months or years)")]
    UnknownUnit(String),
    #[error("unknown clock '{0}' (expected utc, local or an IANA zone name)")]
    UnknownClock(String),
    #[error("unknown selection mode '{0}' (expected single, multiple or range)")]
    UnknownMode(String),
}

/// A point in time with calendar field access, arithmetic and formatting.
#[derive(Debug, Clone)]
pub struct CalendarDate {
    millis: Option<i64>,
    clock: DateClock,
    names: Arc<NameTables>,
}

impl CalendarDate {
    /// A date at the given epoch milliseconds.
    pub fn from_millis(millis: i64, clock: DateClock) -> Self {
        Self {
            millis: Some(millis),
            clock,
            names: Arc::default(),
        }
    }

    /// The invalid-date sentinel.
    pub fn invalid(clock: DateClock) -> Self {
        Self {
            millis: None,
            clock,
            names: Arc::default(),
        }
    }

    /// A date from wall-clock fields in `clock`. Fields overflow like
    /// [`set`](Self::set); `month` is 0-based.
    pub fn from_fields(clock: DateClock, year: i64, month: i64, day: i64) -> Self {
        let parts = CivilParts {
            year,
            month,
            day,
            weekday: 0,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        };
        Self {
            millis: parts.compose().and_then(|naive| clock.from_naive(naive)),
            clock,
            names: Arc::default(),
        }
    }

    /// Replaces the name tables used by [`format`](Self::format).
    pub fn with_names(mut self, names: Arc<NameTables>) -> Self {
        self.names = names;
        self
    }

    pub fn clock(&self) -> DateClock {
        self.clock
    }

    pub fn names(&self) -> &Arc<NameTables> {
        &self.names
    }

    pub fn is_valid(&self) -> bool {
        self.naive().is_some()
    }

    /// Epoch milliseconds, the comparable key for this date.
    pub fn value_of(&self) -> Option<i64> {
        self.millis
    }

    /// Wall-clock fields in this date's clock.
    pub fn naive(&self) -> Option<NaiveDateTime> {
        self.millis.and_then(|millis| self.clock.to_naive(millis))
    }

    fn parts(&self) -> Option<CivilParts> {
        self.naive().map(|naive| CivilParts::from_naive(&naive))
    }

    fn store(&mut self, parts: Option<CivilParts>) {
        self.millis = parts
            .and_then(|p| p.compose())
            .and_then(|naive| self.clock.from_naive(naive));
    }

    pub fn get(&self, field: DateField) -> Option<i64> {
        self.parts().map(|p| (field.access().get)(&p))
    }

    /// Sets a field, carrying overflow into the larger fields.
    pub fn set(&mut self, field: DateField, value: i64) -> &mut Self {
        let parts = self.parts().map(|mut p| {
            (field.access().set)(&mut p, value);
            p
        });
        self.store(parts);
        self
    }

    /// Adds `delta` to a field.
    ///
    /// Day and time fields cascade through [`set`](Self::set). Months and
    /// years keep the day of month where it exists and otherwise clamp to
    /// the target month's last day, so January 31st plus one month is the
    /// last day of February.
    pub fn add(&mut self, field: DateField, delta: i64) -> &mut Self {
        match field {
            DateField::Month => self.add_months(delta),
            DateField::Year => self.add_months(delta.saturating_mul(12)),
            _ => {
                let parts = self.parts().and_then(|mut p| {
                    let access = field.access();
                    let current = (access.get)(&p);
                    (access.set)(&mut p, current.checked_add(delta)?);
                    Some(p)
                });
                self.store(parts);
                self
            }
        }
    }

    pub fn subtract(&mut self, field: DateField, delta: i64) -> &mut Self {
        self.add(field, delta.saturating_neg())
    }

    fn add_months(&mut self, delta: i64) -> &mut Self {
        let shifted = self.naive().and_then(|naive| {
            let months = Months::new(u32::try_from(delta.unsigned_abs()).ok()?);
            if delta >= 0 {
                naive.checked_add_months(months)
            } else {
                naive.checked_sub_months(months)
            }
        });
        self.millis = shifted.and_then(|naive| self.clock.from_naive(naive));
        self
    }

    /// Zeroes hours, minutes, seconds and milliseconds.
    pub fn strip_time(&mut self) -> &mut Self {
        self.set(DateField::Hours, 0)
            .set(DateField::Minutes, 0)
            .set(DateField::Seconds, 0)
            .set(DateField::Milliseconds, 0)
    }

    /// Number of days in this date's month: day 0 of the following month.
    pub fn days_in_month(&self) -> Option<u32> {
        let mut probe = self.clone();
        probe
            .set(DateField::Date, 1)
            .add(DateField::Month, 1)
            .set(DateField::Date, 0);
        probe.get(DateField::Date).map(|day| day as u32)
    }

    /// Renders `pattern` by token substitution (`YYYY-MM-DD`, `MMMM`, `dddd`, ...).
    pub fn format(&self, pattern: &str) -> String {
        match self.naive() {
            Some(naive) => format::format_naive(pattern, &naive, &self.names),
            None => INVALID_DATE.to_string(),
        }
    }
}

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.millis, other.millis), (Some(a), Some(b)) if a == b)
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.millis, other.millis) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.naive() {
            Some(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S%.3f")),
            None => f.write_str(INVALID_DATE),
        }
    }
}
