//! Error handling for the watcher
//!
//! This module defines the infrastructure error type shared across the
//! crate. Provider-call classification lives in [`crate::core::client`].

use thiserror::Error;

/// Result type alias for the watcher
pub type Result<T> = std::result::Result<T, WatcherError>;

/// Main infrastructure error type for the watcher
#[derive(Error, Debug)]
pub enum WatcherError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Redis errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Counter store errors
    #[error("Counter store error: {0}")]
    Store(String),
}
