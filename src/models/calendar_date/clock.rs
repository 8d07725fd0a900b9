use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::DateError;

/// The calendar clock through which a date's fields are read and written.
///
/// A date never switches clock after its fields have been touched; every
/// get/set on one instance goes through the same clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DateClock {
    #[default]
    Utc,
    /// The host's local time zone.
    Local,
    /// A named IANA zone.
    Zone(Tz),
}

impl DateClock {
    /// Wall-clock fields for an epoch instant.
    pub fn to_naive(&self, millis: i64) -> Option<NaiveDateTime> {
        let instant = DateTime::<Utc>::from_timestamp_millis(millis)?;
        Some(match self {
            DateClock::Utc => instant.naive_utc(),
            DateClock::Local => instant.with_timezone(&Local).naive_local(),
            DateClock::Zone(tz) => instant.with_timezone(tz).naive_local(),
        })
    }

    /// Epoch instant for wall-clock fields.
    pub fn from_naive(&self, naive: NaiveDateTime) -> Option<i64> {
        match self {
            DateClock::Utc => Some(naive.and_utc().timestamp_millis()),
            DateClock::Local => resolve_local(&Local, naive),
            DateClock::Zone(tz) => resolve_local(tz, naive),
        }
    }
}

// Ambiguous wall times take the earlier instant; times inside a DST gap are
// pushed forward by the gap, so day stepping never stalls.
fn resolve_local<Z: TimeZone>(zone: &Z, naive: NaiveDateTime) -> Option<i64> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.timestamp_millis()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp_millis()),
        LocalResult::None => {
            let shifted = naive.checked_add_signed(Duration::try_hours(1)?)?;
            zone.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.timestamp_millis())
        }
    }
}

impl FromStr for DateClock {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" | "z" => Ok(DateClock::Utc),
            "local" => Ok(DateClock::Local),
            _ => s
                .trim()
                .parse::<Tz>()
                .map(DateClock::Zone)
                .map_err(|_| DateError::UnknownClock(s.to_string())),
        }
    }
}

impl TryFrom<String> for DateClock {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateClock> for String {
    fn from(clock: DateClock) -> Self {
        clock.to_string()
    }
}

impl fmt::Display for DateClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateClock::Utc => write!(f, "utc"),
            DateClock::Local => write!(f, "local"),
            DateClock::Zone(tz) => write!(f, "{}", tz.name()),
        }
    }
}
