//! Core rate limiter implementation

use super::types::UsageStats;
use crate::config::models::QuotaConfig;
use crate::core::counters::CounterStore;
use crate::core::window;
use crate::utils::error::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

/// Default key prefix for the watcher's counters
const KEY_PREFIX: &str = "pagespeed_watcher:";

/// Admission control over the daily and per-minute quota windows.
///
/// `can_proceed` and `record_proceeded` are deliberately separate
/// operations: two callers racing through the check in the same instant
/// can both be admitted, so the limit is soft. The store-level increment
/// is still an atomic read-modify-write, so counts are never lost — only
/// the admission decision races. The provider remains the ultimate
/// authority on quota; this limiter throttles this process's intent.
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    quota: QuotaConfig,
    prefix: String,
}

impl RateLimiter {
    /// Create a rate limiter over the given counter store
    pub fn new(store: Arc<dyn CounterStore>, quota: QuotaConfig) -> Self {
        Self {
            store,
            quota,
            prefix: KEY_PREFIX.to_string(),
        }
    }

    /// Create a rate limiter with a custom key prefix
    pub fn with_prefix(store: Arc<dyn CounterStore>, quota: QuotaConfig, prefix: &str) -> Self {
        Self {
            store,
            quota,
            prefix: prefix.to_string(),
        }
    }

    /// Whether a request is currently permitted under both windows.
    ///
    /// Pure read, no side effects. A counter-store failure fails closed:
    /// without a readable count the quota state is unknown, and admitting
    /// blind risks an uncontrolled overrun.
    pub async fn can_proceed(&self) -> bool {
        self.check_daily_limit().await && self.check_minute_limit().await
    }

    /// Record that a request was actually issued.
    ///
    /// Increments both window counters, refreshing each counter's expiry
    /// to its window boundary. Store failures are logged and swallowed:
    /// the HTTP attempt already consumed provider capacity and cannot be
    /// unsent by a bookkeeping error.
    pub async fn record_proceeded(&self) {
        let now = Utc::now();

        let daily_key = self.daily_counter_key();
        if let Err(e) = self.store.increment(&daily_key, window::end_of_day(now)).await {
            warn!(key = %daily_key, "Failed to record daily counter: {}", e);
        }

        let minute_key = self.minute_counter_key();
        if let Err(e) = self
            .store
            .increment(&minute_key, window::end_of_minute(now))
            .await
        {
            warn!(key = %minute_key, "Failed to record minute counter: {}", e);
        }
    }

    /// Current usage statistics for both windows
    pub async fn usage_stats(&self) -> Result<UsageStats> {
        let daily_used = self.store.fetch(&self.daily_counter_key()).await?;
        let minute_used = self.store.fetch(&self.minute_counter_key()).await?;

        Ok(UsageStats {
            daily_used,
            daily_limit: self.quota.daily_limit,
            daily_remaining: self.quota.daily_limit.saturating_sub(daily_used),
            minute_used,
            minute_limit: self.quota.per_minute_limit,
            minute_remaining: self.quota.per_minute_limit.saturating_sub(minute_used),
        })
    }

    async fn check_daily_limit(&self) -> bool {
        let key = self.daily_counter_key();
        let count = match self.store.fetch(&key).await {
            Ok(count) => count,
            Err(e) => {
                warn!(key = %key, "Counter store unavailable, failing closed: {}", e);
                return false;
            }
        };

        if count >= self.quota.daily_limit {
            warn!(
                limit = self.quota.daily_limit,
                used = count,
                "Daily API limit reached"
            );
            return false;
        }

        true
    }

    async fn check_minute_limit(&self) -> bool {
        let key = self.minute_counter_key();
        let count = match self.store.fetch(&key).await {
            Ok(count) => count,
            Err(e) => {
                warn!(key = %key, "Counter store unavailable, failing closed: {}", e);
                return false;
            }
        };

        if count >= self.quota.per_minute_limit {
            warn!(
                limit_per_minute = self.quota.per_minute_limit,
                used = count,
                "Rate limit exceeded"
            );
            return false;
        }

        true
    }

    fn daily_counter_key(&self) -> String {
        format!("{}daily:{}", self.prefix, window::daily_key(Utc::now()))
    }

    fn minute_counter_key(&self) -> String {
        format!("{}minute:{}", self.prefix, window::minute_key(Utc::now()))
    }
}
