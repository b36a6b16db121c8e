//! Live connectivity checks against the real PSI endpoint

use crate::common::fixtures::open_quota;
use crate::common::TestDatabase;
use crate::skip_without_env;
use pagespeed_watcher::config::models::WatcherConfig;
use pagespeed_watcher::core::client::{PsiClient, Strategy};
use pagespeed_watcher::core::counters::MemoryCounterStore;
use pagespeed_watcher::core::ledger::UsageLedger;
use pagespeed_watcher::core::rate_limiter::RateLimiter;
use std::sync::Arc;

#[tokio::test]
#[ignore = "requires PSI_API_KEY and network access"]
async fn test_live_psi_run() {
    skip_without_env!("PSI_API_KEY");

    let db = TestDatabase::new().await;
    let quota = open_quota();
    let config = WatcherConfig {
        psi_api_key: std::env::var("PSI_API_KEY").ok(),
        quota: quota.clone(),
        ..Default::default()
    };

    let store = Arc::new(MemoryCounterStore::new());
    let limiter = Arc::new(RateLimiter::new(store, quota.clone()));
    let ledger = Arc::new(UsageLedger::new(db.db_arc(), quota));
    let client = PsiClient::new(&config, limiter, ledger).unwrap();

    let report = client
        .run_test("https://example.com", Strategy::Mobile)
        .await
        .expect("live PSI call should succeed");

    // example.com scores well on any honest run
    assert!(report.metrics.score.unwrap_or(0.0) > 0.5);
}
