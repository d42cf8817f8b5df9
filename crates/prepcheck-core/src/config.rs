//! Application configuration management.
//!
//! The configuration file is optional and only overrides which model is
//! called and where IAM tokens come from. Credentials never live here; they
//! are read from the environment.
//!
//! Configuration is stored at `~/.config/prepcheck/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::ModelSettings;

/// Application name used for config/log directory paths
pub const APP_NAME: &str = "prepcheck";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Foundation model to call instead of the default
    pub model_id: Option<String>,
    /// IAM token endpoint, for non-public IBM Cloud regions
    pub iam_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files
    pub fn log_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Model settings with this config's overrides applied
    pub fn model_settings(&self) -> ModelSettings {
        let mut settings = ModelSettings::default();
        if let Some(ref model_id) = self.model_id {
            settings.model_id = model_id.clone();
        }
        if let Some(ref iam_url) = self.iam_url {
            settings.iam_url = iam_url.clone();
        }
        settings
    }
}
