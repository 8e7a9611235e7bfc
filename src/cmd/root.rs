use crate::data::{
    persistence::get_config_dir, BlockedDateData, DemoSettings, Persistable, SavedSelection,
};
use crate::ui::demo::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;

pub fn run() -> Result<()> {
    let settings = DemoSettings::load()?;
    let blocked_data = BlockedDateData::load()?;
    let saved = SavedSelection::load()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let mut app = App::new(settings, &blocked_data, &saved, today)?;

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    // Persist what the session changed
    let config_dir = get_config_dir().unwrap_or_else(|_| std::path::PathBuf::from("./config"));
    app.saved().save()?;
    crate::cmd::init::save_settings_to(&app.settings, &config_dir)?;

    result
}
