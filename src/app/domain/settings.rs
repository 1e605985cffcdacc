use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};

const APP_DIR: &str = "sdk-docs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Directory searched for page sources before the embedded copies.
    #[serde(default)]
    pub docs_dir: Option<PathBuf>,

    #[serde(default = "default_start_path")]
    pub start_path: String,

    #[serde(default = "default_window_width")]
    pub window_width: i32,

    #[serde(default = "default_window_height")]
    pub window_height: i32,

    /// How often the system color scheme is polled, in seconds.
    #[serde(default = "default_ambient_poll_secs")]
    pub ambient_poll_secs: u64,

    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_start_path() -> String {
    "/".to_string()
}

fn default_window_width() -> i32 {
    960
}

fn default_window_height() -> i32 {
    720
}

fn default_ambient_poll_secs() -> u64 {
    2
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            docs_dir: None,
            start_path: default_start_path(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            ambient_poll_secs: default_ambient_poll_secs(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to parse settings: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                if let Err(e) = default.save_to(path) {
                    tracing::debug!("Could not write default settings: {e}");
                }
                default
            }
        }
    }

    /// Parse and sanity-check a settings document.
    pub fn parse(contents: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_width < 200 || self.window_height < 150 {
            return Err(AppError::Settings(format!(
                "window size {}x{} is too small",
                self.window_width, self.window_height
            )));
        }
        if self.ambient_poll_secs == 0 {
            return Err(AppError::Settings(
                "ambient_poll_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = Self::config_dir();
        path.push("settings.json");
        path
    }

    /// Location of the persisted UI preferences (theme, locale).
    pub fn preferences_path() -> PathBuf {
        let mut path = Self::config_dir();
        path.push("preferences.json");
        path
    }

    pub fn config_dir() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path
    }
}
