//! Provider quota configuration

use serde::{Deserialize, Serialize};

/// Quota limits for the PageSpeed Insights API identity.
///
/// Two independent windows: a long-horizon daily quota and a short-horizon
/// per-minute burst limit. Requests beyond `daily_limit` are billable at
/// `cost_per_request_usd`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuotaConfig {
    /// Maximum requests per calendar day
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u64,
    /// Maximum requests per calendar minute
    #[serde(default = "default_per_minute_limit")]
    pub per_minute_limit: u64,
    /// Estimated cost per request beyond the daily limit, in USD
    #[serde(default = "default_cost_per_request")]
    pub cost_per_request_usd: f64,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            daily_limit: default_daily_limit(),
            per_minute_limit: default_per_minute_limit(),
            cost_per_request_usd: default_cost_per_request(),
        }
    }
}

fn default_daily_limit() -> u64 {
    25_000
}

fn default_per_minute_limit() -> u64 {
    10
}

fn default_cost_per_request() -> f64 {
    0.002
}
