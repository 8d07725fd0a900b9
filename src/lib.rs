// Rust Datepicker Library
// Exports all modules for testing and reuse

pub mod models;
pub mod services;
pub mod ui;

pub use models::calendar_date::{CalendarDate, DateClock, DateError, DateField, NameTables};
pub use models::selection::{DayHighlight, SelectionMode};
pub use models::settings::{PickerSettings, SettingsValidationError};
pub use services::calendar_set::{NavDirection, NavUnit};
pub use services::date_engine::{DateFactory, DateInput, DefaultDateFactory};
pub use services::events::{EventKind, PickerEvent, SelectionPayload};
pub use services::picker::DatePicker;
