//! Terminal date pickers: a pure calendar-grid engine, an event-driven
//! picker controller, and a ratatui rendering layer, plus the demo app and
//! CLI built on them.

pub mod calendar;
pub mod cmd;
pub mod data;
pub mod picker;
pub mod ui;

pub use calendar::{
    build_month_grid, DateBounds, DateFormat, DateRange, DayCell, Locale, Selection, ViewMonth,
};
pub use picker::{PickerConfig, PickerEffect, PickerEvent, PickerState, Placement, SelectionPhase};
