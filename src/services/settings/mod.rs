use crate::models::settings::Settings;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `webcal_url`
pub const WEBCAL_URL_ENV: &str = "DAY_AGENDA_WEBCAL_URL";

const CONFIG_FILE: &str = "config.toml";

pub struct SettingsService;

impl SettingsService {
    /// Default location of the config file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "DayAgenda", "DayAgenda")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load settings from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let mut settings = match path {
            Some(path) => Self::read(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path)?,
                _ => {
                    log::debug!("no config file, using defaults");
                    Settings::default()
                }
            },
        };

        if let Ok(url) = env::var(WEBCAL_URL_ENV) {
            if !url.trim().is_empty() {
                log::debug!("webcal_url taken from {}", WEBCAL_URL_ENV);
                settings.webcal_url = Some(url.trim().to_string());
            }
        }

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        Ok(settings)
    }

    fn read(path: &Path) -> Result<Settings> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        log::debug!("loaded settings from {:?}", path);
        Ok(settings)
    }
}
