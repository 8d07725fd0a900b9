//! Selection policy types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::calendar_date::DateError;

/// How day clicks change the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one selected day.
    #[default]
    Single,
    /// Any number of days, toggled one click at a time.
    Multiple,
    /// A start and an end day, kept in ascending order.
    Range,
}

impl SelectionMode {
    /// Most days the mode keeps, `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        match self {
            SelectionMode::Single => Some(1),
            SelectionMode::Multiple => None,
            SelectionMode::Range => Some(2),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(SelectionMode::Single),
            "multiple" => Ok(SelectionMode::Multiple),
            "range" => Ok(SelectionMode::Range),
            _ => Err(DateError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Single => write!(f, "single"),
            SelectionMode::Multiple => write!(f, "multiple"),
            SelectionMode::Range => write!(f, "range"),
        }
    }
}

/// How a day cell relates to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayHighlight {
    #[default]
    None,
    /// The day is a member of the selection.
    Selected,
    /// The day lies strictly between the two ends of a range.
    InRange,
}
