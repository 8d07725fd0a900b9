// Settings module
// Picker configuration, loaded from TOML by SettingsService

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::calendar_date::{DateClock, NameTables};
use crate::models::selection::SelectionMode;

/// Format patterns used for pane labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneFormats {
    /// Pane title, e.g. "March, 2021".
    pub title_date: String,
    /// Weekday column headers.
    pub header_day: String,
    /// Day cell labels.
    pub day: String,
}

impl Default for PaneFormats {
    fn default() -> Self {
        Self {
            title_date: "MMMM, YYYY".to_string(),
            header_day: "dd".to_string(),
            day: "D".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerSettings {
    pub mode: SelectionMode,
    /// Number of month panes shown side by side.
    pub calendars: usize,
    /// Date the first pane opens on; today when unset.
    pub date: Option<String>,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_week_day: u8,
    pub highlight_today: bool,
    pub clock: DateClock,
    pub visible: bool,
    /// Send raw timestamps instead of dates in select events.
    pub raw_select_events: bool,
    pub formats: PaneFormats,
    /// Month and weekday names; English when unset.
    pub names: Option<NameTables>,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Single,
            calendars: 2,
            date: None,
            first_week_day: 0, // Sunday
            highlight_today: true,
            clock: DateClock::Utc,
            visible: true,
            raw_select_events: false,
            formats: PaneFormats::default(),
            names: None,
        }
    }
}

impl PickerSettings {
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        if self.first_week_day > 6 {
            return Err(SettingsValidationError::FirstWeekDay(self.first_week_day));
        }
        if self.calendars == 0 {
            return Err(SettingsValidationError::NoCalendars);
        }
        if let Some(ref names) = self.names {
            if names.months.len() != 12 {
                return Err(SettingsValidationError::MonthNames(names.months.len()));
            }
            if names.week_days.len() != 7 {
                return Err(SettingsValidationError::WeekDayNames(names.week_days.len()));
            }
        }
        Ok(())
    }

    /// Name tables for this picker; each call builds a fresh table so
    /// pickers never share customizations.
    pub fn name_tables(&self) -> Arc<NameTables> {
        Arc::new(self.names.clone().unwrap_or_default())
    }
}

/// Validation errors for PickerSettings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsValidationError {
    #[error("first week day must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    FirstWeekDay(u8),
    #[error("at least one calendar pane is required")]
    NoCalendars,
    #[error("month name table needs 12 entries, got {0}")]
    MonthNames(usize),
    #[error("weekday name table needs 7 entries, got {0}")]
    WeekDayNames(usize),
}
