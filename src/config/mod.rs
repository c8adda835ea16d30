use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Path of the SQLite ledger file.
    pub database: String,
    /// Deployment timezone as a fixed UTC offset in minutes. All clock
    /// timestamps are normalized to this zone when resolving the calendar
    /// day a session belongs to.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
    /// Optional default site file (projects, fences, managers) for CLI
    /// commands that need registry data.
    #[serde(default)]
    pub site_file: Option<String>,
}

fn default_utc_offset() -> i32 {
    0
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            utc_offset_minutes: default_utc_offset(),
            site_file: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        match dirs::home_dir() {
            Some(home) => home.join(".fieldledger"),
            None => PathBuf::from(".fieldledger"),
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("fieldledger.conf")
    }

    /// Return the full path of the SQLite ledger
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("fieldledger.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            fs::read_to_string(&path)
                .ok()
                .and_then(|content| serde_yaml::from_str(&content).ok())
                .unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Persist the configuration as YAML, creating the config dir if needed.
    pub fn save(&self) -> AppResult<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("failed to serialize config: {e}")))?;
        fs::write(Self::config_file(), content)?;
        Ok(())
    }
}
