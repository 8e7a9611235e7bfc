use chrono::NaiveDate;

/// A pair of optional endpoints. The controller only ever commits pairs with
/// `start <= end`; callers may still hand in an inverted pair as initial
/// input and it renders permissively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// The caller-owned value of a picker. The variant doubles as the mode
/// switch: a `Single` picker commits one date, a `Range` picker runs the
/// two-click range machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Single(Option<NaiveDate>),
    Range(DateRange),
}

impl Selection {
    pub fn is_range(&self) -> bool {
        matches!(self, Selection::Range(_))
    }

    /// A range with no start counts as empty even when an end is present;
    /// display and the clear affordance key off the start date.
    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Single(value) => value.is_none(),
            Selection::Range(range) => range.start.is_none(),
        }
    }

    /// The date the view month follows: the single date, or the range start.
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        match self {
            Selection::Single(value) => *value,
            Selection::Range(range) => range.start,
        }
    }

    /// The empty value of the same mode.
    pub fn cleared(&self) -> Selection {
        match self {
            Selection::Single(_) => Selection::Single(None),
            Selection::Range(_) => Selection::Range(DateRange::default()),
        }
    }
}
