// Service module exports
// Date engine, grid building, navigation, selection and the picker facade

pub mod calendar_set;
pub mod date_engine;
pub mod events;
pub mod grid;
pub mod picker;
pub mod selection;
pub mod settings;
