pub mod blocked_dates;
pub mod persistence;
pub mod saved_selection;
pub mod settings;

pub use blocked_dates::{BlockedDate, BlockedDateData};
pub use persistence::Persistable;
pub use saved_selection::SavedSelection;
pub use settings::DemoSettings;
