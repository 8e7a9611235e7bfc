use crate::data::persistence::{FileFormat, Persistable};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single non-selectable calendar day and the reason shown for it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BlockedDate {
    pub date: String,
    pub reason: String,
}

impl BlockedDate {
    pub fn new(date: &str, reason: &str) -> Self {
        BlockedDate {
            date: date.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct BlockedDateData {
    pub blocked: Vec<BlockedDate>,
}

impl Persistable for BlockedDateData {
    fn filename() -> &'static str {
        "blocked_dates.yaml"
    }
    fn format() -> FileFormat {
        FileFormat::Yaml
    }
}

impl BlockedDateData {
    pub fn add(&mut self, blocked: BlockedDate) {
        self.blocked.push(blocked);
    }

    pub fn get_reason_map(&self) -> std::collections::HashMap<String, &BlockedDate> {
        let mut map = std::collections::HashMap::new();
        for b in &self.blocked {
            map.insert(b.date.clone(), b);
        }
        map
    }

    /// Parses every entry's date string, erroring on the first bad one.
    pub fn parsed_dates(&self) -> Result<Vec<NaiveDate>> {
        self.blocked
            .iter()
            .map(|b| {
                NaiveDate::parse_from_str(&b.date, "%Y-%m-%d")
                    .with_context(|| format!("failed to parse blocked date '{}'", b.date))
            })
            .collect()
    }
}
