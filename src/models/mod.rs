// Module exports for models
// Plain data: dates, month grids, selection modes and settings

pub mod calendar_date;
pub mod month_view;
pub mod selection;
pub mod settings;
