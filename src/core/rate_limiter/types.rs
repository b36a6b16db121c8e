//! Rate limiter types

use serde::Serialize;

/// Point-in-time usage across both quota windows
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UsageStats {
    /// Requests recorded in the current daily window
    pub daily_used: u64,
    /// Daily window limit
    pub daily_limit: u64,
    /// Requests left in the current daily window
    pub daily_remaining: u64,
    /// Requests recorded in the current minute window
    pub minute_used: u64,
    /// Minute window limit
    pub minute_limit: u64,
    /// Requests left in the current minute window
    pub minute_remaining: u64,
}
