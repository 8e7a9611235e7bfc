use serde::{Deserialize, Serialize};

use crate::calendar::{DateBounds, DateFormat, Locale};

/// Where the popup opens relative to the input field. `Auto` prefers below
/// and flips above when the popup would clip the bottom of the screen.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    #[default]
    Bottom,
    Auto,
}

/// Everything the embedder configures about a picker. The committed value is
/// not here; the caller owns it and passes it alongside each event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    pub bounds: DateBounds,
    pub date_format: DateFormat,
    pub clearable: bool,
    pub disabled: bool,
    pub show_week_numbers: bool,
    pub placement: Placement,
    pub locale: Locale,
    pub placeholder: String,
    /// Externally supplied validation message, rendered verbatim under the
    /// field. The picker itself never produces one.
    pub error: Option<String>,
    /// When set, visibility is controlled by the embedder: the picker emits
    /// open/close effects but no longer flips its own state.
    pub open_override: Option<bool>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            bounds: DateBounds::default(),
            date_format: DateFormat::default(),
            clearable: false,
            disabled: false,
            show_week_numbers: false,
            placement: Placement::default(),
            locale: Locale::default(),
            placeholder: "Select date".to_string(),
            error: None,
            open_override: None,
        }
    }
}
