pub mod config;
pub mod state;

pub use config::{PickerConfig, Placement};
pub use state::{PickerEffect, PickerEvent, PickerState, SelectionPhase};
