use crate::data::{BlockedDate, BlockedDateData, DemoSettings, SavedSelection};
use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Saves updated settings to config.yaml under their `settings` key.
pub(crate) fn save_settings_to(settings: &DemoSettings, dir: &Path) -> Result<()> {
    let config = ConfigFile {
        settings: settings.clone(),
    };
    let yaml = serde_norway::to_string(&config)?;
    fs::write(dir.join("config.yaml"), yaml)?;
    Ok(())
}

/// Serializer for config.yaml. The settings live under a named key so the
/// file has room to grow more sections later.
#[derive(Serialize)]
struct ConfigFile {
    settings: DemoSettings,
}

pub fn run() -> Result<()> {
    let dir = crate::data::persistence::get_config_dir()?;
    fs::create_dir_all(&dir)?;
    run_in_dir(&dir)?;
    println!("Config files initialized successfully.");
    Ok(())
}

/// Writes all default config files into `dir`. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    write_config(dir)?;
    write_blocked_dates(dir)?;
    write_selection(dir)?;
    Ok(())
}

fn write_config(dir: &Path) -> Result<()> {
    let config = ConfigFile {
        settings: DemoSettings {
            min_date_raw: Some("2026-01-01".to_string()),
            max_date_raw: Some("2026-12-31".to_string()),
            ..Default::default()
        },
    };
    let yaml = serde_norway::to_string(&config)?;
    fs::write(dir.join("config.yaml"), yaml)?;
    Ok(())
}

fn write_blocked_dates(dir: &Path) -> Result<()> {
    let mut data = BlockedDateData::default();
    init_blocked_dates(&mut data);
    let yaml = serde_norway::to_string(&data)?;
    fs::write(dir.join("blocked_dates.yaml"), yaml)?;
    Ok(())
}

fn write_selection(dir: &Path) -> Result<()> {
    let data = SavedSelection::default();
    let json = serde_json::to_string_pretty(&data)?;
    fs::write(dir.join("selection.json"), json)?;
    Ok(())
}

fn init_blocked_dates(data: &mut BlockedDateData) {
    data.add(BlockedDate::new("2026-01-01", "New Year's Day"));
    data.add(BlockedDate::new("2026-05-25", "Memorial Day"));
    data.add(BlockedDate::new("2026-07-04", "Independence Day"));
    data.add(BlockedDate::new("2026-09-07", "Labor Day"));
    data.add(BlockedDate::new("2026-11-26", "Thanksgiving Day"));
    data.add(BlockedDate::new("2026-12-24", "Christmas Eve"));
    data.add(BlockedDate::new("2026-12-25", "Christmas Day"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(serde::Deserialize)]
    struct Wrapper {
        settings: DemoSettings,
    }

    #[test]
    fn test_run_in_dir_creates_all_files() {
        let tmp = TempDir::new().unwrap();
        run_in_dir(tmp.path()).unwrap();
        assert!(tmp.path().join("config.yaml").exists(), "config.yaml missing");
        assert!(
            tmp.path().join("blocked_dates.yaml").exists(),
            "blocked_dates.yaml missing"
        );
        assert!(
            tmp.path().join("selection.json").exists(),
            "selection.json missing"
        );
    }

    #[test]
    fn test_selection_file_starts_empty() {
        let tmp = TempDir::new().unwrap();
        write_selection(tmp.path()).unwrap();
        let content = fs::read_to_string(tmp.path().join("selection.json")).unwrap();
        let data: SavedSelection = serde_json::from_str(&content).unwrap();
        assert!(data.delivery_date.is_none(), "selection should start empty");
        assert!(data.pause_start.is_none());
        assert!(data.pause_end.is_none());
    }

    #[test]
    fn test_config_yaml_contains_settings_section() {
        let tmp = TempDir::new().unwrap();
        write_config(tmp.path()).unwrap();
        let content = fs::read_to_string(tmp.path().join("config.yaml")).unwrap();
        assert!(content.contains("settings"), "config.yaml missing 'settings' key");
        assert!(content.contains("date_format"), "config.yaml missing 'date_format'");
        assert!(content.contains("min_date"), "config.yaml missing 'min_date'");
        assert!(content.contains("2026-12-31"), "config.yaml missing max bound");
    }

    #[test]
    fn test_config_yaml_is_parseable_as_settings() {
        let tmp = TempDir::new().unwrap();
        write_config(tmp.path()).unwrap();
        let content = fs::read_to_string(tmp.path().join("config.yaml")).unwrap();
        let w: Wrapper = serde_norway::from_str(&content).unwrap();
        assert_eq!(w.settings.locale, "en-US");
        assert_eq!(w.settings.min_date_raw.as_deref(), Some("2026-01-01"));
        assert!(w.settings.show_week_numbers);
    }

    #[test]
    fn test_blocked_dates_file_is_parseable() {
        let tmp = TempDir::new().unwrap();
        write_blocked_dates(tmp.path()).unwrap();
        let content = fs::read_to_string(tmp.path().join("blocked_dates.yaml")).unwrap();
        let data: BlockedDateData = serde_norway::from_str(&content).unwrap();
        assert_eq!(data.blocked.len(), 7, "expected 7 blocked dates");
        assert_eq!(data.parsed_dates().unwrap().len(), 7);
    }

    #[test]
    fn test_save_settings_to_preserves_custom_values() {
        let tmp = TempDir::new().unwrap();
        let settings = DemoSettings {
            locale: "de-DE".to_string(),
            show_week_numbers: false,
            ..Default::default()
        };
        save_settings_to(&settings, tmp.path()).unwrap();
        let content = fs::read_to_string(tmp.path().join("config.yaml")).unwrap();
        assert!(content.contains("de-DE"));
        let w: Wrapper = serde_norway::from_str(&content).unwrap();
        assert_eq!(w.settings.locale, "de-DE");
        assert!(!w.settings.show_week_numbers);
    }
}
