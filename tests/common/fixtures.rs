//! PSI response fixtures and component wiring helpers

use pagespeed_watcher::config::models::{QuotaConfig, WatcherConfig};
use pagespeed_watcher::core::client::PsiClient;
use pagespeed_watcher::core::counters::MemoryCounterStore;
use pagespeed_watcher::core::ledger::UsageLedger;
use pagespeed_watcher::core::rate_limiter::RateLimiter;
use serde_json::{json, Value};
use std::sync::Arc;

use super::TestDatabase;

/// A representative successful PSI response body
pub fn psi_success_body() -> Value {
    json!({
        "id": "https://example.com/",
        "lighthouseResult": {
            "requestedUrl": "https://example.com/",
            "categories": {
                "performance": { "score": 0.91 }
            },
            "audits": {
                "largest-contentful-paint": { "numericValue": 1800.0 },
                "interaction-to-next-paint": { "numericValue": 140.0 },
                "first-contentful-paint": { "numericValue": 950.0 },
                "server-response-time": { "numericValue": 180.0 },
                "max-potential-fid": { "numericValue": 20.0 },
                "cumulative-layout-shift": { "numericValue": 0.05 }
            }
        }
    })
}

/// A provider error body as PSI returns it, even on HTTP 200
pub fn psi_error_body(code: u16, message: &str) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message,
            "status": "ERROR"
        }
    })
}

/// Everything a client test needs, wired over an in-memory database and
/// counter store
pub struct TestHarness {
    pub client: PsiClient,
    pub ledger: Arc<UsageLedger>,
    pub limiter: Arc<RateLimiter>,
}

/// Build a client against `endpoint` (a mock server URI) with the given
/// quota and API key
pub async fn harness(endpoint: &str, quota: QuotaConfig, api_key: Option<&str>) -> TestHarness {
    let db = TestDatabase::new().await;

    let config = WatcherConfig {
        psi_api_key: api_key.map(String::from),
        endpoint: endpoint.to_string(),
        quota: quota.clone(),
        ..Default::default()
    };

    let store = Arc::new(MemoryCounterStore::new());
    let limiter = Arc::new(RateLimiter::new(store, quota.clone()));
    let ledger = Arc::new(UsageLedger::new(db.db_arc(), quota));
    let client = PsiClient::new(&config, limiter.clone(), ledger.clone())
        .expect("Failed to build PSI client");

    TestHarness {
        client,
        ledger,
        limiter,
    }
}

/// A quota wide enough to stay out of the way
pub fn open_quota() -> QuotaConfig {
    QuotaConfig {
        daily_limit: 1000,
        per_minute_limit: 1000,
        cost_per_request_usd: 0.002,
    }
}
