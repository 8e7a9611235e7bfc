use crate::calendar::{DateRange, Selection};
use crate::data::persistence::{FileFormat, Persistable};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The demo's two field values as stored on disk between runs.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct SavedSelection {
    pub delivery_date: Option<String>,
    pub pause_start: Option<String>,
    pub pause_end: Option<String>,
}

impl Persistable for SavedSelection {
    fn filename() -> &'static str {
        "selection.json"
    }
    fn format() -> FileFormat {
        FileFormat::Json
    }
}

impl SavedSelection {
    pub fn from_fields(delivery: &Selection, pause: &Selection) -> Self {
        let delivery_date = match delivery {
            Selection::Single(value) => value.map(to_raw),
            Selection::Range(range) => range.start.map(to_raw),
        };
        let (pause_start, pause_end) = match pause {
            Selection::Range(range) => (range.start.map(to_raw), range.end.map(to_raw)),
            Selection::Single(value) => (value.map(to_raw), None),
        };
        SavedSelection {
            delivery_date,
            pause_start,
            pause_end,
        }
    }

    pub fn delivery(&self) -> Result<Selection> {
        Ok(Selection::Single(parse_raw(
            &self.delivery_date,
            "delivery_date",
        )?))
    }

    pub fn pause(&self) -> Result<Selection> {
        let start = parse_raw(&self.pause_start, "pause_start")?;
        let end = parse_raw(&self.pause_end, "pause_end")?;
        Ok(Selection::Range(DateRange::new(start, end)))
    }
}

fn to_raw(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_raw(raw: &Option<String>, field: &str) -> Result<Option<NaiveDate>> {
    match raw {
        Some(s) => {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("failed to parse {} '{}'", field, s))?;
            Ok(Some(date))
        }
        None => Ok(None),
    }
}
