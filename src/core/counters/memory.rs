//! In-memory counter store
//!
//! Suitable for single-process deployments and tests. Every mutation runs
//! under one write-lock acquisition, so increments are atomic with respect
//! to concurrent callers.

use super::CounterStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CounterEntry {
    count: u64,
    expires_at: DateTime<Utc>,
}

/// HashMap-backed counter store with time-based eviction
#[derive(Debug, Clone, Default)]
pub struct MemoryCounterStore {
    entries: Arc<RwLock<HashMap<String, CounterEntry>>>,
}

impl MemoryCounterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop expired entries.
    ///
    /// Reads already treat expired entries as absent; this only reclaims
    /// memory for long-running processes.
    pub async fn prune(&self) {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
    }

    /// Number of live (unexpired) entries
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        let entries = self.entries.read().await;
        entries.values().filter(|e| e.expires_at > now).count()
    }

    /// Whether the store holds no live entries
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn fetch(&self, key: &str) -> Result<u64> {
        let entries = self.entries.read().await;
        Ok(match entries.get(key) {
            Some(entry) if entry.expires_at > Utc::now() => entry.count,
            _ => 0,
        })
    }

    async fn increment(&self, key: &str, expires_at: DateTime<Utc>) -> Result<u64> {
        let mut entries = self.entries.write().await;
        // Avoid String allocation if key already exists
        let entry = if let Some(e) = entries.get_mut(key) {
            e
        } else {
            entries.entry(key.to_string()).or_insert(CounterEntry {
                count: 0,
                expires_at,
            })
        };

        // A leftover counter from an elapsed window starts over
        if entry.expires_at <= Utc::now() {
            entry.count = 0;
        }

        entry.count += 1;
        entry.expires_at = expires_at;
        Ok(entry.count)
    }
}
