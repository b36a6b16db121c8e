//! API usage ledger entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per calendar date of provider usage.
///
/// `requests_total == requests_ok + requests_error` holds after every
/// completed update; `cost_usd_estimate` is recomputed from the
/// post-increment total inside the update statement, never accumulated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "watcher_api_usage")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Calendar date this row accounts for
    #[sea_orm(unique)]
    pub date: Date,
    /// Requests attempted against the provider
    pub requests_total: i64,
    /// Requests classified as successful
    pub requests_ok: i64,
    /// Requests classified as any failure
    pub requests_error: i64,
    /// Estimated cost of requests beyond the daily limit, USD
    pub cost_usd_estimate: f64,
    /// Row creation timestamp
    pub created_at: DateTimeUtc,
    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
