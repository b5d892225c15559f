//! Configuration handling
//!
//! Settings are read from `seminars.toml`, looked up in this order: an
//! explicitly given path, the data directory, the user's global config
//! directory. Whatever is found is deserialized over the defaults; no
//! file at all is fine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RegistrationSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// File name looked for in the data and global config directories
const CONFIG_FILE: &str = "seminars.toml";

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Registration rule settings handed into the domain as a snapshot
    pub registration: RegistrationSettings,

    /// Directory holding `events.jsonl` and `registrations.jsonl`;
    /// the `--data-dir` flag overrides this
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration, trying the explicit path first, then the
    /// data directory, then the global config directory
    pub fn load(explicit: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read_from(path);
        }

        if let Some(dir) = data_dir {
            let path = dir.join(CONFIG_FILE);
            if path.exists() {
                return Self::read_from(&path);
            }
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                return Self::read_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Reads and parses one configuration file
    fn read_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Returns the global config file location
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "seminars", "seminars-cli")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}
