//! Durable usage accounting
//!
//! A date-keyed ledger of provider requests and the estimated cost of
//! exceeding the daily quota. Independent of the rate limiter's transient
//! counters: the ledger survives restarts and accumulates indefinitely
//! for reporting and billing estimates.

use crate::config::models::QuotaConfig;
use crate::storage::database::entities::api_usage;
use crate::storage::database::Database;
use crate::utils::error::Result;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One calendar date's accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsage {
    /// Calendar date
    pub date: NaiveDate,
    /// Requests attempted against the provider
    pub requests_total: i64,
    /// Requests classified as successful
    pub requests_ok: i64,
    /// Requests classified as any failure
    pub requests_error: i64,
    /// Estimated cost of requests beyond the daily limit, USD
    pub cost_usd_estimate: f64,
}

impl From<api_usage::Model> for DailyUsage {
    fn from(model: api_usage::Model) -> Self {
        Self {
            date: model.date,
            requests_total: model.requests_total,
            requests_ok: model.requests_ok,
            requests_error: model.requests_error,
            cost_usd_estimate: model.cost_usd_estimate,
        }
    }
}

/// Date-keyed request ledger over the database
pub struct UsageLedger {
    db: Arc<Database>,
    quota: QuotaConfig,
}

impl UsageLedger {
    /// Create a ledger over the given database
    pub fn new(db: Arc<Database>, quota: QuotaConfig) -> Self {
        Self { db, quota }
    }

    /// Record one completed request outcome on today's row.
    ///
    /// Creates the row lazily and updates it atomically; safe under
    /// concurrent callers recording on the same date.
    pub async fn record_outcome(&self, success: bool) -> Result<()> {
        self.db
            .record_usage(Utc::now().date_naive(), success, &self.quota)
            .await
    }

    /// Usage for a single date, if any was recorded
    pub async fn get_record(&self, date: NaiveDate) -> Result<Option<DailyUsage>> {
        Ok(self.db.find_usage_by_date(date).await?.map(DailyUsage::from))
    }

    /// Usage rows in `[start, end]`, ascending by date.
    ///
    /// Callers aggregate over the result client-side (e.g. weekly sums).
    pub async fn get_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyUsage>> {
        Ok(self
            .db
            .find_usage_range(start, end)
            .await?
            .into_iter()
            .map(DailyUsage::from)
            .collect())
    }
}
