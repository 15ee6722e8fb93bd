//! Configuration management for connection defaults.
//!
//! Stores configuration in JSON format at `~/.bpdu-finder/config.json`.
//! Passwords are never written here.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::{DEFAULT_LABEL_WIDTH, DEFAULT_SSH_PORT};
use crate::error::{Error, Result};

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SSH username used when none is given on the command line.
    #[serde(default)]
    pub username: Option<String>,

    /// SSH port of the devices.
    #[serde(default = "default_ssh_port", rename = "sshPort")]
    pub ssh_port: u16,

    /// Seconds allowed for connecting to a device.
    #[serde(default = "default_connect_timeout", rename = "connectTimeoutSecs")]
    pub connect_timeout_secs: u64,

    /// Width of the port label column in text reports.
    #[serde(default = "default_label_width", rename = "labelWidth")]
    pub label_width: usize,
}

fn default_ssh_port() -> u16 {
    DEFAULT_SSH_PORT
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_label_width() -> usize {
    DEFAULT_LABEL_WIDTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            ssh_port: default_ssh_port(),
            connect_timeout_secs: default_connect_timeout(),
            label_width: default_label_width(),
        }
    }
}

impl Config {
    /// Connect timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Configuration store for connection defaults.
///
/// Handles reading and writing configuration to `~/.bpdu-finder/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.bpdu-finder/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        let config_path = home.join(".bpdu-finder").join("config.json");

        Ok(Self { config_path })
    }

    /// Create a config store with a custom path (for testing).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &std::path::Path {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        if !fs::try_exists(&self.config_path).await.unwrap_or(false) {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &Config) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            fs::create_dir_all(config_dir)
                .await
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }
}
