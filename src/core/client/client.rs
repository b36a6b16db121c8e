//! PSI client implementation

use super::error::{ProviderErrorKind, PsiError};
use super::types::{Strategy, TestReport};
use crate::config::models::WatcherConfig;
use crate::core::ledger::UsageLedger;
use crate::core::metrics;
use crate::core::rate_limiter::RateLimiter;
use crate::utils::error::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

/// Longest provider body fragment carried into an error message
const MAX_MESSAGE_SNIPPET: usize = 200;

/// Quota-governed client for the PSI scoring endpoint.
///
/// One call to [`run_test`](Self::run_test) walks validation, admission
/// control, the HTTP request, outcome classification and usage
/// accounting, in that order. Validation and credential failures surface
/// before any counter or ledger is touched; everything that actually
/// reached the provider is recorded in both.
pub struct PsiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    required_host: Option<String>,
    limiter: Arc<RateLimiter>,
    ledger: Arc<UsageLedger>,
}

impl PsiClient {
    /// Create a client from the watcher configuration
    pub fn new(
        config: &WatcherConfig,
        limiter: Arc<RateLimiter>,
        ledger: Arc<UsageLedger>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http.timeout())
            .connect_timeout(config.http.connect_timeout())
            .user_agent(config.http.user_agent.clone())
            .build()?;

        let required_host = if config.enforce_same_host {
            config
                .app_url
                .as_deref()
                .and_then(|u| Url::parse(u).ok())
                .and_then(|u| u.host_str().map(|h| h.to_string()))
        } else {
            None
        };

        Ok(Self {
            http,
            api_key: config.psi_api_key.clone(),
            endpoint: config.endpoint.clone(),
            required_host,
            limiter,
            ledger,
        })
    }

    /// Run one PSI test for `url` with the given strategy.
    ///
    /// Terminates in exactly one [`TestReport`] or one [`PsiError`].
    /// No outcome is retried internally; [`PsiError::is_retryable`]
    /// informs the caller's own policy.
    pub async fn run_test(
        &self,
        url: &str,
        strategy: Strategy,
    ) -> std::result::Result<TestReport, PsiError> {
        let target = validate_target(url, self.required_host.as_deref())?;

        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(PsiError::MissingCredential)?;

        // Locally rejected calls never reached the provider and are not
        // accounted anywhere
        if !self.limiter.can_proceed().await {
            return Err(PsiError::RateLimitExceeded);
        }

        debug!(url = %target, %strategy, "Issuing PSI request");
        let outcome = self.send_request(target.as_str(), strategy, api_key).await;

        // The attempt consumed provider capacity whatever came back
        self.limiter.record_proceeded().await;

        let classified = match outcome {
            Ok((status, body)) => classify(status, &body),
            Err(e) => Err(e),
        };

        let success = classified.is_ok();
        if let Err(e) = self.ledger.record_outcome(success).await {
            // The call already happened; a bookkeeping failure must not
            // change the caller's result
            error!("Failed to record usage outcome: {}", e);
        }

        let raw = classified?;
        Ok(TestReport {
            metrics: metrics::extract(&raw),
            raw,
        })
    }

    /// Current usage statistics from the rate limiter
    pub async fn usage_stats(&self) -> Result<crate::core::rate_limiter::UsageStats> {
        self.limiter.usage_stats().await
    }

    async fn send_request(
        &self,
        url: &str,
        strategy: Strategy,
        api_key: &str,
    ) -> std::result::Result<(u16, String), PsiError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("url", url),
                ("strategy", strategy.as_str()),
                ("category", "performance"),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| PsiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PsiError::Transport(e.to_string()))?;

        Ok((status, body))
    }
}

/// Validate a test target URL, returning the parsed form
fn validate_target(url: &str, required_host: Option<&str>) -> std::result::Result<Url, PsiError> {
    if url.is_empty() {
        return Err(PsiError::InvalidArgument("url must not be empty".to_string()));
    }

    let parsed = Url::parse(url)
        .map_err(|e| PsiError::InvalidArgument(format!("invalid url {:?}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(PsiError::InvalidArgument(format!(
                "url must use http or https, got {:?}",
                scheme
            )));
        }
    }

    let host = parsed.host_str().ok_or_else(|| {
        PsiError::InvalidArgument(format!("url {:?} has no host", url))
    })?;

    if let Some(required) = required_host {
        if !host.eq_ignore_ascii_case(required) {
            return Err(PsiError::InvalidArgument(format!(
                "url host {:?} does not match the configured host {:?}",
                host, required
            )));
        }
    }

    Ok(parsed)
}

/// Classify an HTTP outcome into the raw body or one error.
///
/// The provider signals failures both as non-2xx statuses and as an
/// `error` object inside an HTTP 200 body; the body's code wins when
/// both are present.
fn classify(status: u16, body: &str) -> std::result::Result<Value, PsiError> {
    if status >= 500 {
        return Err(PsiError::ServerUnavailable { status });
    }

    let ok_status = (200..300).contains(&status);

    match serde_json::from_str::<Value>(body) {
        Ok(value) if value.is_object() => {
            if let Some(err) = value.get("error") {
                let code = err["code"].as_u64().map(|c| c as u16).unwrap_or(status);
                let message = err["message"]
                    .as_str()
                    .unwrap_or("unknown provider error")
                    .to_string();
                Err(PsiError::Provider {
                    kind: ProviderErrorKind::from_code(code),
                    code,
                    message,
                })
            } else if ok_status {
                Ok(value)
            } else {
                Err(PsiError::Provider {
                    kind: ProviderErrorKind::from_code(status),
                    code: status,
                    message: snippet(body),
                })
            }
        }
        _ => Err(PsiError::Provider {
            kind: if ok_status {
                ProviderErrorKind::Other
            } else {
                ProviderErrorKind::from_code(status)
            },
            code: status,
            message: if ok_status {
                "invalid JSON payload from provider".to_string()
            } else {
                snippet(body)
            },
        }),
    }
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_MESSAGE_SNIPPET).collect()
}
