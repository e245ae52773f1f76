//! Compile-time defaults and the optional user settings file.
//!
//! Settings live in `~/.tasklist/config.toml`. Every key is optional; a
//! missing file yields the defaults below. Command-line flags are applied on
//! top by `main`.

use std::{fs, io, path::Path, path::PathBuf};

use serde::Deserialize;

use crate::error::{Result, TaskListError};

pub const APP_DIR_NAME: &str = ".tasklist";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Blank rows created on first activation.
pub const DEFAULT_SEED_COUNT: usize = 5;

pub const DEFAULT_MAX_CAPACITY: usize = 5;

/// Half-hour slots in one day.
pub const SLOTS_PER_DAY: u32 = 48;

/// Day wheel label, e.g. `Feb 3, 2024`.
pub const DAY_LABEL_FORMAT: &str = "%b %-d, %Y";

/// Row date column, e.g. `Feb 3, 2024 14:30`.
pub const ROW_DATE_FORMAT: &str = "%b %-d, %Y %H:%M";

pub const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub seed_count: usize,
    /// Advisory only; reported in the footer, never enforced. `0` turns the
    /// report off.
    pub max_capacity: usize,
    /// Offset used for calendar math. `None` means the system's local offset.
    pub utc_offset_minutes: Option<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed_count: DEFAULT_SEED_COUNT,
            max_capacity: DEFAULT_MAX_CAPACITY,
            utc_offset_minutes: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.seed_count == 0 {
            return Err(TaskListError::config("seed_count must be at least 1"));
        }
        if let Some(minutes) = self.utc_offset_minutes
            && minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES.unsigned_abs()
        {
            return Err(TaskListError::config(format!(
                "utc_offset_minutes={minutes} is outside ±{MAX_UTC_OFFSET_MINUTES}"
            )));
        }
        Ok(())
    }

    pub fn capacity_limit(&self) -> Option<usize> {
        (self.max_capacity > 0).then_some(self.max_capacity)
    }
}

pub fn get_tasklist_dir() -> io::Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Unable to find home directory"))
        .map(|home| home.join(APP_DIR_NAME))
}

pub fn get_config_file_path() -> io::Result<PathBuf> {
    get_tasklist_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Read settings from `path`, falling back to defaults when the file is absent.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(e.into()),
    };

    let settings: Settings = toml::from_str(&content)?;
    settings.validate()?;
    log::info!("Loaded settings from {}", path.display());
    Ok(settings)
}
