//! Top-level watcher configuration

use super::{HttpClientConfig, QuotaConfig, ScoreThresholds, StorageConfig};
use crate::utils::error::{Result, WatcherError};
use serde::{Deserialize, Serialize};

/// Default PSI scoring endpoint
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Watcher configuration root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// PSI API key; tests fail with a credential error when absent
    #[serde(default)]
    pub psi_api_key: Option<String>,
    /// The application's own base URL, used for same-host enforcement
    /// and as the default test target
    #[serde(default)]
    pub app_url: Option<String>,
    /// Reject test URLs whose host differs from `app_url`'s host
    #[serde(default)]
    pub enforce_same_host: bool,
    /// PSI scoring endpoint (overridable for testing)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Quota limits
    #[serde(default)]
    pub quota: QuotaConfig,
    /// Outbound HTTP client settings
    #[serde(default)]
    pub http: HttpClientConfig,
    /// Ledger database and counter store settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Score grading thresholds
    #[serde(default)]
    pub thresholds: ScoreThresholds,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            psi_api_key: None,
            app_url: None,
            enforce_same_host: false,
            endpoint: default_endpoint(),
            quota: QuotaConfig::default(),
            http: HttpClientConfig::default(),
            storage: StorageConfig::default(),
            thresholds: ScoreThresholds::default(),
        }
    }
}

impl WatcherConfig {
    /// Build a configuration from environment variables, starting from
    /// defaults. Unset variables leave the default in place.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("PSI_API_KEY") {
            if !key.is_empty() {
                config.psi_api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("APP_URL") {
            if !url.is_empty() {
                config.app_url = Some(url);
            }
        }
        if let Ok(value) = std::env::var("WATCHER_ENFORCE_SAME_HOST") {
            config.enforce_same_host = matches!(value.as_str(), "1" | "true" | "yes");
        }
        if let Ok(endpoint) = std::env::var("PSI_ENDPOINT") {
            if !endpoint.is_empty() {
                config.endpoint = endpoint;
            }
        }
        if let Ok(value) = std::env::var("API_DAILY_LIMIT") {
            config.quota.daily_limit = parse_env("API_DAILY_LIMIT", &value)?;
        }
        if let Ok(value) = std::env::var("RATE_LIMIT_PER_MINUTE") {
            config.quota.per_minute_limit = parse_env("RATE_LIMIT_PER_MINUTE", &value)?;
        }
        if let Ok(value) = std::env::var("PSI_COST_PER_REQUEST") {
            config.quota.cost_per_request_usd = parse_env("PSI_COST_PER_REQUEST", &value)?;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                config.storage.database.url = url;
            }
        }
        if let Ok(url) = std::env::var("REDIS_URL") {
            if !url.is_empty() {
                config.storage.redis.url = url;
                config.storage.redis.enabled = true;
            }
        }

        Ok(config)
    }

    /// Whether an API key is configured and non-empty
    pub fn has_api_key(&self) -> bool {
        self.psi_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| WatcherError::Config(format!("Invalid {}: {}", name, e)))
}
