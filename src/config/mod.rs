//! Configuration management for the watcher
//!
//! Handles loading and validation of the watcher configuration from a
//! YAML file or from environment variables.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, WatcherError};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the watcher
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Watcher configuration
    pub watcher: WatcherConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| WatcherError::Config(format!("Failed to read config file: {}", e)))?;

        let watcher: WatcherConfig = serde_yaml::from_str(&content)
            .map_err(|e| WatcherError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { watcher };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let watcher = WatcherConfig::from_env()?;
        let config = Self { watcher };

        config.validate()?;
        Ok(config)
    }

    /// Get quota configuration
    pub fn quota(&self) -> &QuotaConfig {
        &self.watcher.quota
    }

    /// Get HTTP client configuration
    pub fn http(&self) -> &HttpClientConfig {
        &self.watcher.http
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.watcher.storage
    }

    /// Get score thresholds
    pub fn thresholds(&self) -> &ScoreThresholds {
        &self.watcher.thresholds
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.watcher.validate()
    }
}
