//! Counter store abstraction
//!
//! A key/value store with atomic increment-with-expiry semantics backing
//! the rate limiter's windows. Implementations must perform the increment
//! as an atomic read-modify-write; the limiter never reads a count and
//! writes it back from application code.

mod memory;

pub use memory::MemoryCounterStore;

use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Atomic windowed counters keyed by window identifier
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Current count for `key`; 0 when the key is absent or expired
    async fn fetch(&self, key: &str) -> Result<u64>;

    /// Atomically increment the counter for `key` by one, setting or
    /// refreshing its expiry, and return the new count.
    ///
    /// The expiry marks the end of the counter's window; an expired
    /// counter reads as 0 and is replaced by the next increment.
    async fn increment(&self, key: &str, expires_at: DateTime<Utc>) -> Result<u64>;
}
