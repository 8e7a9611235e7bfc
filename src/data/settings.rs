use crate::calendar::{DateBounds, DateFormat, Locale};
use crate::data::persistence::{FileFormat, Persistable};
use crate::picker::{PickerConfig, Placement};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Demo-wide picker options, shared by both fields on the screen.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DemoSettings {
    pub date_format: DateFormat,
    pub show_week_numbers: bool,
    pub placement: Placement,
    pub locale: String,
    pub clearable: bool,
    #[serde(rename = "min_date", default)]
    pub min_date_raw: Option<String>,
    #[serde(rename = "max_date", default)]
    pub max_date_raw: Option<String>,
    #[serde(skip)]
    pub min_date: Option<NaiveDate>,
    #[serde(skip)]
    pub max_date: Option<NaiveDate>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        DemoSettings {
            date_format: DateFormat::default(),
            show_week_numbers: true,
            placement: Placement::Auto,
            locale: "en-US".to_string(),
            clearable: true,
            min_date_raw: None,
            max_date_raw: None,
            min_date: None,
            max_date: None,
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: DemoSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn format() -> FileFormat {
        FileFormat::Yaml
    }
}

impl DemoSettings {
    pub fn load() -> Result<Self> {
        let mut settings = SettingsWrapper::load()?.settings;
        settings.parse_dates()?;
        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save()
    }

    /// Fills the parsed bound fields from their raw strings. Absent or
    /// empty raw values leave the bound open.
    pub fn parse_dates(&mut self) -> Result<()> {
        self.min_date = parse_raw_date(&self.min_date_raw, "min_date")?;
        self.max_date = parse_raw_date(&self.max_date_raw, "max_date")?;
        Ok(())
    }

    pub fn resolved_locale(&self) -> Locale {
        Locale::resolve(&self.locale)
    }

    /// Builds the per-field config these settings describe. The caller
    /// supplies what differs between fields.
    pub fn picker_config(&self, placeholder: &str, blocked_dates: Vec<NaiveDate>) -> PickerConfig {
        PickerConfig {
            bounds: DateBounds {
                min_date: self.min_date,
                max_date: self.max_date,
                disabled_dates: blocked_dates,
            },
            date_format: self.date_format,
            clearable: self.clearable,
            disabled: false,
            show_week_numbers: self.show_week_numbers,
            placement: self.placement,
            locale: self.resolved_locale(),
            placeholder: placeholder.to_string(),
            error: None,
            open_override: None,
        }
    }
}

fn parse_raw_date(raw: &Option<String>, field: &str) -> Result<Option<NaiveDate>> {
    match raw {
        Some(s) if !s.is_empty() => {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("failed to parse {} '{}'", field, s))?;
            Ok(Some(date))
        }
        _ => Ok(None),
    }
}
