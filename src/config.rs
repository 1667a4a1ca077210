//! Configuration for SnapKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SnapError};

/// Main configuration for a SnapKV instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory holding the snapshot and its backups
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── db.json                    (primary snapshot)
    ///     └── db_backup_<unix>.json      (one per rotation, never pruned)
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Autosave Configuration
    // -------------------------------------------------------------------------
    /// Time between background snapshot saves
    pub autosave_interval: Duration,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./database"),
            autosave_interval: Duration::from_secs(60),
            listen_addr: "127.0.0.1:4820".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.autosave_interval.is_zero() {
            return Err(SnapError::Config(
                "autosave interval must be greater than zero".to_string(),
            ));
        }
        if self.listen_addr.trim().is_empty() {
            return Err(SnapError::Config("listen address is empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (snapshot and backups)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the autosave interval
    pub fn autosave_interval(mut self, interval: Duration) -> Self {
        self.config.autosave_interval = interval;
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
