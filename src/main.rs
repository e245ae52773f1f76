mod calendar;
mod config;
mod error;
mod selection;
mod store;
mod task;
mod time;
mod ui;

use std::{fs, path::Path, path::PathBuf};

use clap::Parser;
use log::info;

use calendar::{FixedOffsetCalendar, shared as shared_calendar};
use config::{Settings, get_config_file_path, load_settings};
use error::Result;
use store::TaskListStore;
use time::system_clock;
use ui::App;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "A single-screen task list with inline date and time wheels")]
struct Cli {
    #[arg(long, help = "Settings file (defaults to ~/.tasklist/config.toml)")]
    config: Option<PathBuf>,
    #[arg(long, help = "Append log output to this file instead of stderr")]
    log_file: Option<PathBuf>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "UTC offset in minutes for calendar math (defaults to the system offset)"
    )]
    utc_offset: Option<i32>,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => match get_config_file_path() {
            Ok(path) => load_settings(&path)?,
            Err(e) => {
                log::warn!("No settings directory ({e}), using defaults");
                Settings::default()
            }
        },
    };

    if let Some(minutes) = cli.utc_offset {
        settings.utc_offset_minutes = Some(minutes);
    }
    settings.validate()?;
    Ok(settings)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let settings = resolve_settings(&cli)?;
    let calendar = match settings.utc_offset_minutes {
        Some(minutes) => FixedOffsetCalendar::from_minutes(minutes)?,
        None => FixedOffsetCalendar::system(),
    };
    info!("Calendar offset {}", calendar.offset());

    let store = TaskListStore::new(system_clock(), &settings);
    let mut app = App::new(store, shared_calendar(calendar));

    let mut terminal = ratatui::init();
    let app_result = app.run(&mut terminal);
    ratatui::restore();

    if let Err(e) = &app_result {
        eprintln!("tasklist stopped: {e}");
    }
    info!("Exiting with {} task(s)", app.store().len());
    app_result
}
