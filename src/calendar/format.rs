use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::selection::Selection;

/// Display patterns for the input field. Serialized as the pattern string
/// itself so config files read the way the value renders.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
    #[serde(rename = "MMM DD, YYYY")]
    Abbreviated,
}

impl DateFormat {
    pub fn label(self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "MM/DD/YYYY",
            DateFormat::DayMonthYear => "DD/MM/YYYY",
            DateFormat::Iso => "YYYY-MM-DD",
            DateFormat::Abbreviated => "MMM DD, YYYY",
        }
    }

    fn strftime_pattern(self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::DayMonthYear => "%d/%m/%Y",
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::Abbreviated => "%b %d, %Y",
        }
    }

    /// The next format in a fixed rotation, for cycling at runtime.
    pub fn cycled(self) -> Self {
        match self {
            DateFormat::MonthDayYear => DateFormat::DayMonthYear,
            DateFormat::DayMonthYear => DateFormat::Iso,
            DateFormat::Iso => DateFormat::Abbreviated,
            DateFormat::Abbreviated => DateFormat::MonthDayYear,
        }
    }
}

/// All numeric fields are zero-padded to fixed width.
pub fn format_date(date: NaiveDate, format: DateFormat) -> String {
    date.format(format.strftime_pattern()).to_string()
}

/// The input-field text for a selection: empty when nothing is chosen, the
/// formatted date for a single value, and `start - end` for a range. A range
/// still waiting for its end shows a prompt in place of the end date.
pub fn format_selection(selection: &Selection, format: DateFormat) -> String {
    match selection {
        Selection::Single(None) => String::new(),
        Selection::Single(Some(date)) => format_date(*date, format),
        Selection::Range(range) => match (range.start, range.end) {
            (None, _) => String::new(),
            (Some(start), None) => format!("{} - Select end date", format_date(start, format)),
            (Some(start), Some(end)) => {
                format!("{} - {}", format_date(start, format), format_date(end, format))
            }
        },
    }
}
