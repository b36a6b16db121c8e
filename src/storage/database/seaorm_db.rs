//! SeaORM database implementation

use crate::config::models::{DatabaseConfig, QuotaConfig};
use crate::utils::error::{Result, WatcherError};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection,
    DbBackend, EntityTrait, QueryFilter, QueryOrder, Statement,
};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::entities::api_usage;
use super::migration::Migrator;

/// SeaORM-backed ledger database
#[derive(Debug)]
pub struct Database {
    db: DatabaseConnection,
}

impl Database {
    /// Create a new database connection
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let db = SeaDatabase::connect(opt)
            .await
            .map_err(WatcherError::Database)?;

        info!("Database connection established");
        Ok(Self { db })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            WatcherError::Database(e)
        })?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Atomically record one request outcome on `date`'s usage row.
    ///
    /// A single upsert increments the counters and recomputes the cost
    /// estimate from the post-increment total server-side. In the update
    /// branch the column references read the pre-update row, so
    /// `requests_total + 1` is the post-increment total. Doing this in
    /// one statement is what keeps concurrent recorders from losing
    /// updates; reading the row and writing it back is forbidden here.
    pub async fn record_usage(
        &self,
        date: NaiveDate,
        success: bool,
        quota: &QuotaConfig,
    ) -> Result<()> {
        debug!(%date, success, "Recording usage outcome");

        let backend = self.db.get_database_backend();
        let sql = match backend {
            DbBackend::Sqlite => {
                r#"INSERT INTO watcher_api_usage
                    (date, requests_total, requests_ok, requests_error, cost_usd_estimate, created_at, updated_at)
                VALUES (?1, 1, ?2, ?3, ROUND(MAX(0, 1 - ?4) * ?5, 4), ?6, ?6)
                ON CONFLICT(date) DO UPDATE SET
                    requests_total = requests_total + 1,
                    requests_ok = requests_ok + ?2,
                    requests_error = requests_error + ?3,
                    cost_usd_estimate = ROUND(MAX(0, requests_total + 1 - ?4) * ?5, 4),
                    updated_at = ?6"#
            }
            DbBackend::Postgres => {
                r#"INSERT INTO watcher_api_usage
                    (date, requests_total, requests_ok, requests_error, cost_usd_estimate, created_at, updated_at)
                VALUES ($1, 1, $2, $3, ROUND((GREATEST(0, 1 - $4) * $5)::numeric, 4), $6, $6)
                ON CONFLICT (date) DO UPDATE SET
                    requests_total = watcher_api_usage.requests_total + 1,
                    requests_ok = watcher_api_usage.requests_ok + $2,
                    requests_error = watcher_api_usage.requests_error + $3,
                    cost_usd_estimate = ROUND(((GREATEST(0, watcher_api_usage.requests_total + 1 - $4)) * $5)::numeric, 4),
                    updated_at = $6"#
            }
            other => {
                return Err(WatcherError::Database(sea_orm::DbErr::Custom(format!(
                    "unsupported database backend: {:?}",
                    other
                ))));
            }
        };

        let ok_delta: i64 = if success { 1 } else { 0 };
        let err_delta: i64 = if success { 0 } else { 1 };
        let now = Utc::now();

        self.db
            .execute(Statement::from_sql_and_values(
                backend,
                sql,
                [
                    date.into(),
                    ok_delta.into(),
                    err_delta.into(),
                    (quota.daily_limit as i64).into(),
                    quota.cost_per_request_usd.into(),
                    now.into(),
                ],
            ))
            .await
            .map_err(WatcherError::Database)?;

        Ok(())
    }

    /// Usage row for a single date, if one exists
    pub async fn find_usage_by_date(&self, date: NaiveDate) -> Result<Option<api_usage::Model>> {
        debug!(%date, "Finding usage row");

        api_usage::Entity::find()
            .filter(api_usage::Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(WatcherError::Database)
    }

    /// Usage rows in `[start, end]`, ascending by date
    pub async fn find_usage_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<api_usage::Model>> {
        debug!(%start, %end, "Finding usage range");

        api_usage::Entity::find()
            .filter(api_usage::Column::Date.between(start, end))
            .order_by_asc(api_usage::Column::Date)
            .all(&self.db)
            .await
            .map_err(WatcherError::Database)
    }
}
