use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Set once at startup by main() from the --config-dir argument.
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Call this from main() before any load/save operations.
pub fn set_config_dir(path: PathBuf) {
    let _ = CONFIG_DIR.set(path);
}

pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = CONFIG_DIR.get() {
        return Ok(dir.clone());
    }
    // Fallback when running tests or if set_config_dir was not called
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    Ok(cwd.join("config"))
}

pub fn get_file_path(name: &str) -> Result<PathBuf> {
    let dir = get_config_dir()?;
    Ok(dir.join(name))
}

/// On-disk encoding of a persisted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

pub trait Persistable: Sized + Default + Serialize + for<'de> Deserialize<'de> {
    fn filename() -> &'static str;
    fn format() -> FileFormat;

    fn load() -> Result<Self> {
        let dir = get_config_dir()?;
        Self::load_from(&dir)
    }

    fn save(&self) -> Result<()> {
        let dir = get_config_dir()?;
        self.save_to(&dir)
    }

    /// Load from an explicit directory, bypassing the global `CONFIG_DIR`.
    /// A missing file yields the type's default rather than an error.
    fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::filename());
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match Self::format() {
            FileFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse JSON from {}", path.display())),
            FileFormat::Yaml => serde_norway::from_str(&contents)
                .with_context(|| format!("failed to parse YAML from {}", path.display())),
        }
    }

    /// Save to an explicit directory, bypassing the global `CONFIG_DIR`.
    fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let path = dir.join(Self::filename());
        let contents = match Self::format() {
            FileFormat::Json => {
                serde_json::to_string_pretty(self).context("failed to serialize JSON")?
            }
            FileFormat::Yaml => serde_norway::to_string(self).context("failed to serialize YAML")?,
        };
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    /// Minimal Persistable implementation for testing serialization logic.
    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct TestJsonData {
        value: String,
    }

    impl Persistable for TestJsonData {
        fn filename() -> &'static str {
            "test_data.json"
        }
        fn format() -> FileFormat {
            FileFormat::Json
        }
    }

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct TestYamlData {
        count: u32,
    }

    impl Persistable for TestYamlData {
        fn filename() -> &'static str {
            "test_data.yaml"
        }
        fn format() -> FileFormat {
            FileFormat::Yaml
        }
    }

    #[test]
    fn test_get_config_dir_returns_a_path() {
        // When CONFIG_DIR is unset the fallback is cwd/config.
        // When it IS set (by a prior test run), it returns that value.
        // Either way a valid PathBuf should be returned.
        let result = get_config_dir();
        assert!(result.is_ok());
    }

    #[test]
    fn test_get_file_path_appends_filename() {
        let path = get_file_path("my_file.json").unwrap();
        assert!(path.ends_with("my_file.json"));
    }

    #[test]
    fn test_load_from_returns_default_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let result: TestJsonData = TestJsonData::load_from(tmp.path()).unwrap();
        assert_eq!(result, TestJsonData::default());
    }

    #[test]
    fn test_json_save_to_and_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let data = TestJsonData {
            value: "round-trip".to_string(),
        };
        data.save_to(tmp.path()).unwrap();
        let loaded = TestJsonData::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_yaml_save_to_and_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let data = TestYamlData { count: 42 };
        data.save_to(tmp.path()).unwrap();
        let loaded = TestYamlData::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_save_to_creates_directory_if_missing() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        let data = TestJsonData {
            value: "nested".to_string(),
        };
        data.save_to(&nested).unwrap();
        let loaded = TestJsonData::load_from(&nested).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_corrupt_yaml_reports_path_in_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("test_data.yaml"), "count: [not a number").unwrap();
        let err = TestYamlData::load_from(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("test_data.yaml"));
    }

    #[test]
    fn test_blocked_date_data_save_to_load_from() {
        use crate::data::blocked_dates::{BlockedDate, BlockedDateData};
        let tmp = TempDir::new().unwrap();
        let mut data = BlockedDateData::default();
        data.add(BlockedDate::new("2026-07-04", "Independence Day"));
        data.save_to(tmp.path()).unwrap();
        let loaded = BlockedDateData::load_from(tmp.path()).unwrap();
        assert_eq!(loaded.blocked.len(), 1);
        assert_eq!(loaded.blocked[0].reason, "Independence Day");
    }

    #[test]
    fn test_saved_selection_save_to_load_from() {
        use crate::data::saved_selection::SavedSelection;
        let tmp = TempDir::new().unwrap();
        let data = SavedSelection {
            delivery_date: Some("2026-03-05".to_string()),
            pause_start: Some("2026-03-10".to_string()),
            pause_end: None,
        };
        data.save_to(tmp.path()).unwrap();
        let loaded = SavedSelection::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, data);
    }
}
