use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use super::DateError;

/// Calendar fields a [`CalendarDate`](super::CalendarDate) exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Year,
    /// Month of year, 0-based.
    Month,
    /// Day of month, 1-based.
    Date,
    /// Day of week, 0 = Sunday.
    Weekday,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

/// Wall-clock fields of a date, widened so setters can overflow freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CivilParts {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub weekday: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub millisecond: i64,
}

pub(crate) struct FieldAccess {
    pub get: fn(&CivilParts) -> i64,
    pub set: fn(&mut CivilParts, i64),
}

// Indexed by `DateField as usize`.
static FIELD_TABLE: [FieldAccess; 8] = [
    FieldAccess { get: |p| p.year, set: |p, v| p.year = v },
    FieldAccess { get: |p| p.month, set: |p, v| p.month = v },
    FieldAccess { get: |p| p.day, set: |p, v| p.day = v },
    FieldAccess {
        get: |p| p.weekday,
        // Moves within the Sunday-based week of the current date.
        set: |p, v| p.day += v - p.weekday,
    },
    FieldAccess { get: |p| p.hour, set: |p, v| p.hour = v },
    FieldAccess { get: |p| p.minute, set: |p, v| p.minute = v },
    FieldAccess { get: |p| p.second, set: |p, v| p.second = v },
    FieldAccess { get: |p| p.millisecond, set: |p, v| p.millisecond = v },
];

impl DateField {
    pub const ALL: [DateField; 8] = [
        DateField::Year,
        DateField::Month,
        DateField::Date,
        DateField::Weekday,
        DateField::Hours,
        DateField::Minutes,
        DateField::Seconds,
        DateField::Milliseconds,
    ];

    pub(crate) fn access(self) -> &'static FieldAccess {
        &FIELD_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            DateField::Year => "year",
            DateField::Month => "month",
            DateField::Date => "date",
            DateField::Weekday => "day",
            DateField::Hours => "hours",
            DateField::Minutes => "minutes",
            DateField::Seconds => "seconds",
            DateField::Milliseconds => "milliseconds",
        }
    }
}

impl FromStr for DateField {
    type Err = DateError;

    /// Accepts singular and plural names. `days`/`dates` address the day of
    /// month while `day` addresses the weekday.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" | "years" => Ok(DateField::Year),
            "month" | "months" => Ok(DateField::Month),
            "date" | "dates" | "days" => Ok(DateField::Date),
            "day" | "weekday" => Ok(DateField::Weekday),
            "hour" | "hours" => Ok(DateField::Hours),
            "minute" | "minutes" => Ok(DateField::Minutes),
            "second" | "seconds" => Ok(DateField::Seconds),
            "millisecond" | "milliseconds" => Ok(DateField::Milliseconds),
            other => Err(DateError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl CivilParts {
    pub fn from_naive(naive: &NaiveDateTime) -> Self {
        Self {
            year: naive.year() as i64,
            month: naive.month0() as i64,
            day: naive.day() as i64,
            weekday: naive.weekday().num_days_from_sunday() as i64,
            hour: naive.hour() as i64,
            minute: naive.minute() as i64,
            second: naive.second() as i64,
            millisecond: (naive.nanosecond() / 1_000_000).min(999) as i64,
        }
    }

    /// Rebuilds a wall-clock time, carrying overflow from each field into
    /// the next larger one. Month 12 is January of the next year, day 0 is
    /// the last day of the previous month, hour 24 is the next midnight.
    pub fn compose(&self) -> Option<NaiveDateTime> {
        let months = self.year.checked_mul(12)?.checked_add(self.month)?;
        let year = i32::try_from(months.div_euclid(12)).ok()?;
        let month = months.rem_euclid(12) as u32 + 1;

        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let date = first.checked_add_signed(Duration::try_days(self.day.checked_sub(1)?)?)?;

        let time_millis = self
            .hour
            .checked_mul(60)?
            .checked_add(self.minute)?
            .checked_mul(60)?
            .checked_add(self.second)?
            .checked_mul(1000)?
            .checked_add(self.millisecond)?;

        date.and_hms_opt(0, 0, 0)?
            .checked_add_signed(Duration::try_milliseconds(time_millis)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn parts(y: i32, m: u32, d: u32) -> CivilParts {
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        CivilParts::from_naive(&naive)
    }

    #[test_case("years", DateField::Year)]
    #[test_case("month", DateField::Month)]
    #[test_case("days", DateField::Date ; "days addresses day of month")]
    #[test_case("day", DateField::Weekday ; "day addresses weekday")]
    #[test_case("milliseconds", DateField::Milliseconds)]
    fn test_field_aliases(name: &str, expected: DateField) {
        assert_eq!(name.parse::<DateField>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert_eq!(
            "fortnight".parse::<DateField>(),
            Err(DateError::UnknownField("fortnight".to_string()))
        );
    }

    #[test]
    fn test_table_order_matches_enum() {
        let p = parts(2021, 3, 5);
        let values: Vec<i64> = DateField::ALL.iter().map(|f| (f.access().get)(&p)).collect();
        // 2021-03-05 was a Friday.
        assert_eq!(values, vec![2021, 2, 5, 5, 10, 0, 0, 0]);
    }

    #[test]
    fn test_compose_carries_month_overflow() {
        let mut p = parts(2023, 12, 15);
        p.month = 13;
        let naive = p.compose().unwrap();
        assert_eq!((naive.year(), naive.month(), naive.day()), (2024, 2, 15));
    }

    #[test]
    fn test_compose_day_zero_is_previous_month_end() {
        let mut p = parts(2024, 3, 15);
        p.day = 0;
        let naive = p.compose().unwrap();
        assert_eq!((naive.month(), naive.day()), (2, 29));
    }

    #[test]
    fn test_compose_negative_hours_borrow_a_day() {
        let mut p = parts(2024, 1, 1);
        p.hour = -1;
        let naive = p.compose().unwrap();
        assert_eq!((naive.year(), naive.month(), naive.day(), naive.hour()), (2023, 12, 31, 23));
    }

    #[test]
    fn test_weekday_setter_stays_in_sunday_week() {
        let mut p = parts(2021, 3, 5); // Friday
        (DateField::Weekday.access().set)(&mut p, 0);
        let naive = p.compose().unwrap();
        assert_eq!(naive.day(), 28);
        assert_eq!(naive.month(), 2);
    }
}
