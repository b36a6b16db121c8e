//! Rate limiter integration tests over the public API

use pagespeed_watcher::config::models::QuotaConfig;
use pagespeed_watcher::core::counters::MemoryCounterStore;
use pagespeed_watcher::core::rate_limiter::RateLimiter;
use std::sync::Arc;

fn quota(daily: u64, per_minute: u64) -> QuotaConfig {
    QuotaConfig {
        daily_limit: daily,
        per_minute_limit: per_minute,
        cost_per_request_usd: 0.002,
    }
}

#[tokio::test]
async fn test_minute_window_fills_and_blocks() {
    let limiter = RateLimiter::new(Arc::new(MemoryCounterStore::new()), quota(100, 5));

    for _ in 0..5 {
        assert!(limiter.can_proceed().await);
        limiter.record_proceeded().await;
    }

    assert!(!limiter.can_proceed().await);

    let stats = limiter.usage_stats().await.unwrap();
    assert_eq!(stats.minute_used, 5);
    assert_eq!(stats.minute_remaining, 0);
    assert_eq!(stats.daily_remaining, 95);
}

#[tokio::test]
async fn test_limiters_share_counters_through_one_store() {
    // Two limiter instances over the same store see each other's
    // recordings, as two processes sharing Redis would
    let store = Arc::new(MemoryCounterStore::new());
    let a = RateLimiter::new(store.clone(), quota(100, 2));
    let b = RateLimiter::new(store, quota(100, 2));

    a.record_proceeded().await;
    b.record_proceeded().await;

    assert!(!a.can_proceed().await);
    assert!(!b.can_proceed().await);

    let stats = a.usage_stats().await.unwrap();
    assert_eq!(stats.minute_used, 2);
}

#[tokio::test]
async fn test_concurrent_recordings_all_count() {
    let limiter = Arc::new(RateLimiter::new(
        Arc::new(MemoryCounterStore::new()),
        quota(1000, 1000),
    ));

    let mut handles = Vec::new();
    for _ in 0..40 {
        let limiter = limiter.clone();
        handles.push(tokio::spawn(async move {
            limiter.record_proceeded().await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stats = limiter.usage_stats().await.unwrap();
    assert_eq!(stats.daily_used, 40);
    assert_eq!(stats.minute_used, 40);
}
