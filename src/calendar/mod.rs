pub mod format;
pub mod grid;
pub mod locale;
pub mod selection;

pub use format::{format_date, format_selection, DateFormat};
pub use grid::{
    add_months, build_month_grid, days_in_month, first_weekday_of_month, in_range, is_disabled,
    iso_week_number, same_day, DateBounds, DayCell, ViewMonth, GRID_CELLS,
};
pub use locale::Locale;
pub use selection::{DateRange, Selection};
