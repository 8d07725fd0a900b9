//! Token-based date formatting.
//!
//! Patterns are scanned leftmost-first for the tokens below; everything else
//! is copied through untouched.
//!
//! | Token  | Output                                 |
//! |--------|----------------------------------------|
//! | `YYYY` | full year                              |
//! | `YY`   | last two digits of the year            |
//! | `MMMM` | month name                             |
//! | `MMM`  | first three letters of the month name  |
//! | `MM`   | month number, zero padded              |
//! | `M`    | month number                           |
//! | `DDDD` | day of year, zero padded to 3 digits   |
//! | `DDD`  | day of year                            |
//! | `DD`   | day of month, zero padded              |
//! | `D`    | day of month                           |
//! | `dddd` | weekday name                           |
//! | `ddd`  | first three letters of the weekday     |
//! | `dd`   | first two letters of the weekday       |
//! | `d`    | weekday number, 0 = Sunday             |

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDateTime};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Month and weekday names used when formatting.
///
/// Tables are shared between dates through an `Arc` and never mutated in
/// place; customizing a picker's names installs a new table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTables {
    /// Twelve month names, January first.
    pub months: Vec<String>,
    /// Seven weekday names, Sunday first.
    pub week_days: Vec<String>,
}

impl Default for NameTables {
    fn default() -> Self {
        Self {
            months: [
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            week_days: [
                "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl NameTables {
    pub fn month(&self, month0: u32) -> &str {
        self.months.get(month0 as usize).map(String::as_str).unwrap_or("")
    }

    pub fn week_day(&self, weekday: u32) -> &str {
        self.week_days.get(weekday as usize).map(String::as_str).unwrap_or("")
    }

    pub fn is_complete(&self) -> bool {
        self.months.len() == 12 && self.week_days.len() == 7
    }
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new("YYYY|YY|MMMM|MMM|MM|M|DDDD|DDD|DD|D|dddd|ddd|dd|d")
            .expect("format token pattern is valid")
    })
}

fn prefix(name: &str, chars: usize) -> String {
    name.chars().take(chars).collect()
}

fn render_token(token: &str, naive: &NaiveDateTime, names: &NameTables) -> String {
    match token {
        "YYYY" => naive.year().to_string(),
        "YY" => {
            let year = naive.year().to_string();
            let skip = year.chars().count().saturating_sub(2);
            year.chars().skip(skip).collect()
        }
        "MMMM" => names.month(naive.month0()).to_string(),
        "MMM" => prefix(names.month(naive.month0()), 3),
        "MM" => format!("{:02}", naive.month()),
        "M" => naive.month().to_string(),
        "DDDD" => format!("{:03}", naive.ordinal()),
        "DDD" => naive.ordinal().to_string(),
        "DD" => format!("{:02}", naive.day()),
        "D" => naive.day().to_string(),
        "dddd" => names.week_day(naive.weekday().num_days_from_sunday()).to_string(),
        "ddd" | "dd" => prefix(
            names.week_day(naive.weekday().num_days_from_sunday()),
            token.len(),
        ),
        "d" => naive.weekday().num_days_from_sunday().to_string(),
        other => other.to_string(),
    }
}

pub(crate) fn format_naive(pattern: &str, naive: &NaiveDateTime, names: &NameTables) -> String {
    token_pattern()
        .replace_all(pattern, |caps: &Captures| render_token(&caps[0], naive, names))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use test_case::test_case;

    fn naive(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test_case("YYYY-MM-DD", "2021-03-05")]
    #[test_case("YY/M/D", "21/3/5")]
    #[test_case("MMMM, YYYY", "March, 2021")]
    #[test_case("MMM", "Mar")]
    #[test_case("dddd ddd dd d", "Friday Fri Fr 5")]
    #[test_case("DDDD DDD", "064 64")]
    #[test_case("Week of D", "Week of 5" ; "non token text is preserved")]
    fn test_format_tokens(pattern: &str, expected: &str) {
        let names = NameTables::default();
        assert_eq!(format_naive(pattern, &naive(2021, 3, 5), &names), expected);
    }

    #[test]
    fn test_leftmost_longest_token_wins() {
        let names = NameTables::default();
        // "MMMMM" is MMMM followed by M.
        assert_eq!(format_naive("MMMMM", &naive(2021, 3, 5), &names), "March3");
    }

    #[test]
    fn test_custom_names() {
        let names = NameTables {
            months: (1..=12).map(|m| format!("Mois{}", m)).collect(),
            week_days: ["Dimanche", "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };
        assert_eq!(format_naive("dddd MMMM", &naive(2021, 3, 7), &names), "Dimanche Mois3");
    }

    #[test]
    fn test_default_tables_are_complete() {
        assert!(NameTables::default().is_complete());
    }
}
