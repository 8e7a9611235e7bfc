use chrono::{Datelike, Days, NaiveDate};

use crate::calendar::selection::Selection;

/// Cells in a month view: six rows of seven days, always.
pub const GRID_CELLS: usize = 42;

// ── Month arithmetic ──────────────────────────────────────────────────────────

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .signed_duration_since(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
        .num_days() as u32
}

/// Weekday of the first of the month, 0 = Sunday .. 6 = Saturday.
pub fn first_weekday_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap()
        .weekday()
        .num_days_from_sunday()
}

pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let year = date.year();
    let month = date.month() as i32;
    let new_total = month - 1 + months;
    let new_month = ((new_total % 12 + 12) % 12 + 1) as u32;
    let year_delta = new_total.div_euclid(12);
    let new_year = year + year_delta;
    let max_day = days_in_month(new_year, new_month);
    let new_day = date.day().min(max_day);
    NaiveDate::from_ymd_opt(new_year, new_month, new_day).unwrap_or(date)
}

/// ISO-8601 week number. Dec 31 can land in week 1 of the next ISO year and
/// Jan 1 in week 52/53 of the previous one.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

// ── Predicates ────────────────────────────────────────────────────────────────

/// Date-only equality; absent dates never match anything.
pub fn same_day(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// A date equal to either bound is still selectable; only dates strictly
/// outside the bounds or listed individually are disabled.
pub fn is_disabled(
    date: NaiveDate,
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
    disabled_dates: &[NaiveDate],
) -> bool {
    if min_date.map(|min| date < min).unwrap_or(false) {
        return true;
    }
    if max_date.map(|max| date > max).unwrap_or(false) {
        return true;
    }
    disabled_dates.iter().any(|d| same_day(Some(*d), Some(date)))
}

pub fn in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start <= date && date <= end,
        _ => false,
    }
}

// ── View month ────────────────────────────────────────────────────────────────

/// The (year, month) pair identifying the month shown in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewMonth {
    pub year: i32,
    pub month: u32,
}

impl ViewMonth {
    pub fn of(date: NaiveDate) -> Self {
        ViewMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    pub fn shifted(self, months: i32) -> Self {
        ViewMonth::of(add_months(self.first_day(), months))
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Selectability constraints supplied by the embedder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateBounds {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub disabled_dates: Vec<NaiveDate>,
}

impl DateBounds {
    pub fn disables(&self, date: NaiveDate) -> bool {
        is_disabled(date, self.min_date, self.max_date, &self.disabled_dates)
    }
}

/// One grid position, recomputed from scratch on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Day-of-month number, also for cells belonging to adjacent months.
    pub day: u32,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_in_range: bool,
    pub is_range_start: bool,
    pub is_range_end: bool,
    pub is_disabled: bool,
    /// ISO week number of this cell's date.
    pub week: u32,
}

/// Builds the fixed 42-cell grid for `view`: leading cells from the previous
/// month, the month itself, trailing cells from the next. Out-of-month cells
/// keep their disabled flag and week number but never count as selected,
/// in-range, or today.
pub fn build_month_grid(
    view: ViewMonth,
    selection: &Selection,
    today: NaiveDate,
    bounds: &DateBounds,
) -> Vec<DayCell> {
    let first = view.first_day();
    let lead = first_weekday_of_month(view.year, view.month) as u64;
    let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);

    (0..GRID_CELLS as u64)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .map(|date| day_cell(date, view, selection, today, bounds))
        .collect()
}

fn day_cell(
    date: NaiveDate,
    view: ViewMonth,
    selection: &Selection,
    today: NaiveDate,
    bounds: &DateBounds,
) -> DayCell {
    let in_current_month = view.contains(date);
    let (is_selected, is_in_range, is_range_start, is_range_end) = if in_current_month {
        match selection {
            Selection::Single(value) => (same_day(*value, Some(date)), false, false, false),
            Selection::Range(range) => {
                let is_start = same_day(range.start, Some(date));
                let is_end = same_day(range.end, Some(date));
                (
                    is_start || is_end,
                    in_range(date, range.start, range.end),
                    is_start,
                    is_end,
                )
            }
        }
    } else {
        (false, false, false, false)
    };

    DayCell {
        date,
        day: date.day(),
        in_current_month,
        is_today: in_current_month && date == today,
        is_selected,
        is_in_range,
        is_range_start,
        is_range_end,
        is_disabled: bounds.disables(date),
        week: iso_week_number(date),
    }
}
