use chrono::{Datelike, NaiveDate};

const EN_DAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const DE_DAYS: [&str; 7] = ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"];
const FR_DAYS: [&str; 7] = ["Di", "Lu", "Ma", "Me", "Je", "Ve", "Sa"];
const ES_DAYS: [&str; 7] = ["Do", "Lu", "Ma", "Mi", "Ju", "Vi", "Sá"];

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const DE_MONTHS: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
    "Oktober", "November", "Dezember",
];
const FR_MONTHS: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];
const ES_MONTHS: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];

/// Built-in label sets for weekday headers and spoken-style date labels.
/// Resolved from a language tag; anything unrecognized falls back to English.
/// The numeric `DateFormat` patterns are not localized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    German,
    French,
    Spanish,
}

impl Locale {
    /// Accepts tags like "en", "en-US", "de_DE"; only the language part
    /// matters.
    pub fn resolve(tag: &str) -> Locale {
        let lower = tag.to_ascii_lowercase();
        match lower.split(['-', '_']).next().unwrap_or("") {
            "de" => Locale::German,
            "fr" => Locale::French,
            "es" => Locale::Spanish,
            _ => Locale::English,
        }
    }

    /// Two-letter weekday labels, Sunday first.
    pub fn day_labels(self) -> [&'static str; 7] {
        match self {
            Locale::English => EN_DAYS,
            Locale::German => DE_DAYS,
            Locale::French => FR_DAYS,
            Locale::Spanish => ES_DAYS,
        }
    }

    pub fn month_name(self, month: u32) -> &'static str {
        let table = match self {
            Locale::English => &EN_MONTHS,
            Locale::German => &DE_MONTHS,
            Locale::French => &FR_MONTHS,
            Locale::Spanish => &ES_MONTHS,
        };
        (month as usize)
            .checked_sub(1)
            .and_then(|i| table.get(i))
            .copied()
            .unwrap_or("Unknown")
    }

    /// Spoken-style label for status lines, e.g. "March 5, 2024".
    pub fn long_date(self, date: NaiveDate) -> String {
        let month = self.month_name(date.month());
        match self {
            Locale::English => format!("{} {}, {}", month, date.day(), date.year()),
            Locale::German => format!("{}. {} {}", date.day(), month, date.year()),
            Locale::French => format!("{} {} {}", date.day(), month, date.year()),
            Locale::Spanish => format!("{} de {} de {}", date.day(), month, date.year()),
        }
    }
}
