//! # pagespeed-watcher
//!
//! A quota-governed client for the Google PageSpeed Insights API with
//! durable usage accounting.
//!
//! ## Features
//!
//! - **Two-window admission control**: a daily quota and a per-minute
//!   burst limit, checked locally before a provider call is attempted
//! - **Durable usage ledger**: date-keyed request counts and an estimated
//!   overage cost, updated atomically and safe under concurrent callers
//! - **Structured outcome classification**: every call ends in one
//!   normalized metrics result or one classified error; retry guidance is
//!   carried by the classification, never by message text
//! - **Pluggable counter store**: process-local memory or shared Redis
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagespeed_watcher::config::Config;
//! use pagespeed_watcher::core::client::{PsiClient, Strategy};
//! use pagespeed_watcher::core::counters::MemoryCounterStore;
//! use pagespeed_watcher::core::ledger::UsageLedger;
//! use pagespeed_watcher::core::rate_limiter::RateLimiter;
//! use pagespeed_watcher::storage::database::Database;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!
//!     let db = Arc::new(Database::new(&config.storage().database).await?);
//!     db.migrate().await?;
//!
//!     let store = Arc::new(MemoryCounterStore::new());
//!     let limiter = Arc::new(RateLimiter::new(store, config.quota().clone()));
//!     let ledger = Arc::new(UsageLedger::new(db, config.quota().clone()));
//!
//!     let client = PsiClient::new(&config.watcher, limiter, ledger)?;
//!     let report = client.run_test("https://example.com", Strategy::Mobile).await?;
//!
//!     println!("score: {:?}", report.metrics.score);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::client::{ProviderErrorKind, PsiClient, PsiError, Strategy, TestReport};
pub use core::ledger::{DailyUsage, UsageLedger};
pub use core::metrics::NormalizedMetrics;
pub use core::rate_limiter::{RateLimiter, UsageStats};
pub use utils::error::{Result, WatcherError};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Watcher build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Unix timestamp of the build
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

/// Build metadata embedded by the build script
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
    }
}
