//! Configuration management for taskdesk.
//!
//! The only settings are where the task backend lives and how long a single
//! request may take. They are stored as pretty-printed JSON in the platform
//! data directory and can be overridden per run.
//!
//! ## Resolution Order
//!
//! 1. `--api-url` command-line flag
//! 2. `TASKDESK_API_URL` environment variable (a `.env` file is honoured)
//! 3. `config.json` in the data directory
//! 4. Built-in default (`http://localhost:8000`)
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\taskdesk\config.json`
//! - **macOS**: `~/Library/Application Support/taskdesk/config.json`
//! - **Linux**: `~/.local/share/taskdesk/config.json`
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use taskdesk::libs::config::Config;
//!
//! // Effective configuration for this run, without a flag override
//! let config = Config::resolve(None)?;
//! println!("Backend: {}", config.api_url);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::time::Duration;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured backend address.
pub const API_URL_ENV: &str = "TASKDESK_API_URL";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the task backend, without a trailing path.
    pub api_url: String,

    /// Upper bound for one request, connection included.
    ///
    /// A request that exceeds it fails as a network error instead of hanging
    /// the view that waits on it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Reads the configuration file, or the defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Effective configuration for this run.
    ///
    /// Starts from the stored file and applies the environment variable and
    /// then `api_url_override` on top of it.
    pub fn resolve(api_url_override: Option<&str>) -> Result<Config> {
        let mut config = Self::read()?;
        if let Ok(api_url) = env::var(API_URL_ENV) {
            if !api_url.trim().is_empty() {
                config.api_url = api_url;
            }
        }
        if let Some(api_url) = api_url_override.filter(|url| !url.trim().is_empty()) {
            config.api_url = api_url.to_string();
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Interactive setup prefilled with the stored values.
    pub fn init() -> Result<Self> {
        let config = Self::read().unwrap_or_default();
        msg_print!(Message::ConfigModuleServer);
        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            timeout_secs: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTimeout.to_string())
                .default(config.timeout_secs)
                .interact_text()?,
        })
    }
}
