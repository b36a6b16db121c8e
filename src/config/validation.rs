//! Configuration validation
//!
//! Validation logic for the watcher configuration structures.

use super::models::*;
use crate::utils::error::{Result, WatcherError};
use tracing::{debug, warn};
use url::Url;

/// Validation contract implemented by every configuration model
pub trait Validate {
    /// Check the configuration for internal consistency
    fn validate(&self) -> Result<()>;
}

impl Validate for WatcherConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating watcher configuration");

        if !self.has_api_key() {
            // Not fatal: the key may arrive later; running a test without it fails
            warn!("PSI_API_KEY not configured");
        }

        if let Some(app_url) = &self.app_url {
            validate_http_url(app_url, "app_url")?;
        } else if self.enforce_same_host {
            return Err(WatcherError::Config(
                "enforce_same_host requires app_url to be set".to_string(),
            ));
        }

        validate_http_url(&self.endpoint, "endpoint")?;

        self.quota.validate()?;
        self.http.validate()?;
        self.thresholds.validate()?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

impl Validate for QuotaConfig {
    fn validate(&self) -> Result<()> {
        if self.daily_limit == 0 {
            return Err(WatcherError::Config(
                "quota.daily_limit must be greater than zero".to_string(),
            ));
        }
        if self.per_minute_limit == 0 {
            return Err(WatcherError::Config(
                "quota.per_minute_limit must be greater than zero".to_string(),
            ));
        }
        if self.cost_per_request_usd < 0.0 {
            return Err(WatcherError::Config(
                "quota.cost_per_request_usd must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for HttpClientConfig {
    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(WatcherError::Config(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(WatcherError::Config(
                "http.connect_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for ScoreThresholds {
    fn validate(&self) -> Result<()> {
        if self.excellent <= self.good {
            return Err(WatcherError::Config(format!(
                "thresholds.excellent ({}) must be greater than thresholds.good ({})",
                self.excellent, self.good
            )));
        }
        Ok(())
    }
}

fn validate_http_url(url_str: &str, context: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| WatcherError::Config(format!("{} has invalid URL format: {}", context, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(WatcherError::Config(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(WatcherError::Config(format!(
            "{} URL must have a host",
            context
        )));
    }

    Ok(())
}
