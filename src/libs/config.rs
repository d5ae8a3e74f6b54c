//! Settings persistence.
//!
//! Settings live in `config.json` inside the per-user data directory (see
//! [`DataStorage`]). The file is optional: a missing file means defaults, and
//! [`Config::load_or_default`] also falls back to defaults when the file cannot
//! be read or parsed, so a broken settings file never prevents tracking.
//!
//! ```json
//! {
//!   "monitor": {
//!     "threshold_seconds": 15,
//!     "poll_interval": 1000,
//!     "refresh_interval": 1000
//!   }
//! }
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_print, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Seconds without input after which an open session is closed.
pub const DEFAULT_IDLE_THRESHOLD: u64 = 15;

/// Activity monitor settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    /// Inactivity threshold in seconds before a session is closed.
    pub threshold_seconds: u64,

    /// Idle checker cadence in milliseconds.
    pub poll_interval: u64,

    /// Status line cadence in milliseconds for `watch --status`.
    pub refresh_interval: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            threshold_seconds: DEFAULT_IDLE_THRESHOLD,
            poll_interval: 1000,
            refresh_interval: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<MonitorConfig>,

    /// Top-level threshold of the flat settings layout. Read only; `save`
    /// always writes the `monitor` section.
    #[serde(rename = "ThresholdSeconds", default, skip_serializing)]
    pub legacy_threshold: Option<u64>,
}

impl Config {
    /// Reads `config.json` from the data directory.
    ///
    /// A missing file yields the default configuration; an unreadable or
    /// malformed file is an error.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(config_file_path)
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Like [`Config::read`], but logs and falls back to defaults on any error.
    pub fn load_or_default() -> Config {
        match Self::read() {
            Ok(config) => config,
            Err(e) => {
                msg_warning!(Message::ConfigLoadFailed(format!("{:#}", e)));
                Config::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(config_file_path)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Monitor settings, or defaults when the section is absent.
    pub fn monitor(&self) -> MonitorConfig {
        match (&self.monitor, self.legacy_threshold) {
            (Some(monitor), _) => monitor.clone(),
            (None, Some(threshold_seconds)) => MonitorConfig {
                threshold_seconds,
                ..MonitorConfig::default()
            },
            (None, None) => MonitorConfig::default(),
        }
    }

    /// Copy of the settings with the idle threshold replaced. The result is
    /// always in the `monitor` section layout.
    pub fn with_threshold(mut self, threshold_seconds: u64) -> Self {
        let monitor = self.monitor();
        self.legacy_threshold = None;
        self.monitor = Some(MonitorConfig {
            threshold_seconds,
            ..monitor
        });
        self
    }

    /// Interactive settings wizard. Existing values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.monitor();

        msg_print!(Message::ConfigModuleMonitor, true);
        config.legacy_threshold = None;
        config.monitor = Some(MonitorConfig {
            threshold_seconds: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptIdleThreshold.to_string())
                .default(default.threshold_seconds)
                .interact_text()?,
            poll_interval: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptPollInterval.to_string())
                .default(default.poll_interval)
                .interact_text()?,
            refresh_interval: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRefreshInterval.to_string())
                .default(default.refresh_interval)
                .interact_text()?,
        });

        Ok(config)
    }
}
