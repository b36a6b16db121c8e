//! Redis-backed counter store
//!
//! Backs the rate limiter in multi-process deployments. The increment is
//! `INCR` + `PEXPIREAT` in one MULTI/EXEC pipeline, so the count and its
//! window expiry move together and concurrent increments never lose an
//! update.

use super::pool::RedisPool;
use crate::core::counters::CounterStore;
use crate::utils::error::{Result, WatcherError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;

/// Counter store on a shared Redis instance
#[derive(Debug, Clone)]
pub struct RedisCounterStore {
    pool: RedisPool,
}

impl RedisCounterStore {
    /// Create a counter store over an existing pool
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn fetch(&self, key: &str) -> Result<u64> {
        let mut conn = self.pool.connection();
        let count: Option<u64> = conn.get(key).await.map_err(WatcherError::Redis)?;
        Ok(count.unwrap_or(0))
    }

    async fn increment(&self, key: &str, expires_at: DateTime<Utc>) -> Result<u64> {
        let mut conn = self.pool.connection();
        let (count,): (u64,) = redis::pipe()
            .atomic()
            .incr(key, 1u64)
            .pexpire_at(key, expires_at.timestamp_millis())
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(WatcherError::Redis)?;
        Ok(count)
    }
}
