//! Application configuration.

use crate::consts::cli_consts::{approvals, ui};
use crate::pages::Section;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::{fs, path::Path};

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "UPASTHITI_CONFIG";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Section shown when the dashboard opens.
    pub default_section: Section,

    /// Fill the dashboard background instead of using the terminal's.
    pub with_background_color: bool,

    /// Simulated round-trip for approve and decline.
    pub decision_latency_ms: u64,

    /// Zero skips the splash screen.
    pub splash_duration_ms: u64,

    /// Fixture file to load instead of the built-in dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_section: Section::default(),
            with_background_color: false,
            decision_latency_ms: approvals::DECISION_LATENCY_MS,
            splash_duration_ms: ui::SPLASH_DURATION_MS,
            data_file: None,
        }
    }
}

impl Config {
    pub fn decision_latency(&self) -> Duration {
        Duration::from_millis(self.decision_latency_ms)
    }

    pub fn splash_duration(&self) -> Duration {
        Duration::from_millis(self.splash_duration_ms)
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// The file at `path` if there is one, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the config file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        match fs::remove_file(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// `$UPASTHITI_CONFIG` when set, otherwise `~/.upasthiti/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine the home directory",
        )
    })?;
    Ok(home.join(".upasthiti").join("config.json"))
}
