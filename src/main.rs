use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tui_datepicker::{cmd, data};

#[derive(Parser)]
#[command(name = "tui-datepicker", about = "terminal date picker")]
struct Cli {
    /// Path to the directory containing config files (default: ./config)
    #[arg(long, default_value = "./config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config files with sample settings and blocked dates
    Init,
    /// Print one month as a text calendar grid
    Grid {
        /// Month to print (e.g. 2026-03)
        month: String,
        /// Digits only: no today/blocked markers, week numbers, or legend
        #[arg(long)]
        plain: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve config_dir to an absolute path so file I/O works regardless
    // of directory changes within the process.
    let config_dir = if cli.config_dir.is_absolute() {
        cli.config_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.config_dir)
    };
    data::persistence::set_config_dir(config_dir);

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Grid { month, plain }) => cmd::grid::run(&month, plain),
    }
}
