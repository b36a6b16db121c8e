//! Usage ledger integration tests against in-memory SQLite

use crate::common::TestDatabase;
use chrono::{NaiveDate, Utc};
use pagespeed_watcher::config::models::QuotaConfig;
use pagespeed_watcher::core::ledger::UsageLedger;
use std::sync::Arc;

fn quota(daily_limit: u64, cost: f64) -> QuotaConfig {
    QuotaConfig {
        daily_limit,
        per_minute_limit: 10,
        cost_per_request_usd: cost,
    }
}

#[tokio::test]
async fn test_first_outcome_creates_row() {
    let db = TestDatabase::new().await;
    let ledger = UsageLedger::new(db.db_arc(), quota(100, 0.01));

    let today = Utc::now().date_naive();
    assert!(ledger.get_record(today).await.unwrap().is_none());

    ledger.record_outcome(true).await.unwrap();

    let usage = ledger.get_record(today).await.unwrap().unwrap();
    assert_eq!(usage.requests_total, 1);
    assert_eq!(usage.requests_ok, 1);
    assert_eq!(usage.requests_error, 0);
    assert_eq!(usage.cost_usd_estimate, 0.0);
}

#[tokio::test]
async fn test_counters_satisfy_invariant() {
    let db = TestDatabase::new().await;
    let ledger = UsageLedger::new(db.db_arc(), quota(1000, 0.01));

    // 7 successes, 3 failures
    for i in 0..10 {
        ledger.record_outcome(i % 10 < 7).await.unwrap();
    }

    let usage = ledger
        .get_record(Utc::now().date_naive())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(usage.requests_total, 10);
    assert_eq!(usage.requests_ok, 7);
    assert_eq!(usage.requests_error, 3);
    assert_eq!(usage.requests_total, usage.requests_ok + usage.requests_error);
}

#[tokio::test]
async fn test_cost_formula_over_the_limit() {
    let db = TestDatabase::new().await;
    let ledger = UsageLedger::new(db.db_arc(), quota(100, 0.01));

    for _ in 0..150 {
        ledger.record_outcome(true).await.unwrap();
    }

    let usage = ledger
        .get_record(Utc::now().date_naive())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(usage.requests_total, 150);
    // max(0, 150 - 100) * 0.01
    assert_eq!(usage.cost_usd_estimate, 0.50);
}

#[tokio::test]
async fn test_cost_is_zero_under_the_limit() {
    let db = TestDatabase::new().await;
    let ledger = UsageLedger::new(db.db_arc(), quota(100, 0.01));

    for _ in 0..50 {
        ledger.record_outcome(false).await.unwrap();
    }

    let usage = ledger
        .get_record(Utc::now().date_naive())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(usage.requests_total, 50);
    assert_eq!(usage.cost_usd_estimate, 0.0);
}

#[tokio::test]
async fn test_concurrent_outcomes_lose_nothing() {
    let db = TestDatabase::new().await;
    let ledger = Arc::new(UsageLedger::new(db.db_arc(), quota(1000, 0.002)));

    let mut handles = Vec::new();
    for i in 0..30 {
        let ledger = ledger.clone();
        handles.push(tokio::spawn(async move {
            ledger.record_outcome(i % 2 == 0).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let usage = ledger
        .get_record(Utc::now().date_naive())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(usage.requests_total, 30);
    assert_eq!(usage.requests_ok, 15);
    assert_eq!(usage.requests_error, 15);
}

#[tokio::test]
async fn test_range_is_ascending_and_inclusive() {
    let db = TestDatabase::new().await;
    let q = quota(1000, 0.002);

    // Write rows on explicit dates through the database handle
    let d1 = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
    let d2 = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
    let d3 = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
    for date in [d3, d1, d2] {
        db.db().record_usage(date, true, &q).await.unwrap();
    }
    // And one outside the queried range
    let outside = NaiveDate::from_ymd_opt(2026, 8, 9).unwrap();
    db.db().record_usage(outside, true, &q).await.unwrap();

    let ledger = UsageLedger::new(db.db_arc(), q);
    let range = ledger.get_range(d1, d3).await.unwrap();

    assert_eq!(range.len(), 3);
    assert_eq!(range[0].date, d1);
    assert_eq!(range[1].date, d2);
    assert_eq!(range[2].date, d3);
}

#[tokio::test]
async fn test_distinct_dates_have_independent_rows() {
    let db = TestDatabase::new().await;
    let q = quota(1000, 0.002);

    let d1 = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
    let d2 = NaiveDate::from_ymd_opt(2026, 8, 2).unwrap();
    db.db().record_usage(d1, true, &q).await.unwrap();
    db.db().record_usage(d1, false, &q).await.unwrap();
    db.db().record_usage(d2, true, &q).await.unwrap();

    let ledger = UsageLedger::new(db.db_arc(), q);
    let first = ledger.get_record(d1).await.unwrap().unwrap();
    let second = ledger.get_record(d2).await.unwrap().unwrap();

    assert_eq!(first.requests_total, 2);
    assert_eq!(second.requests_total, 1);
}

#[tokio::test]
async fn test_cost_recomputes_rather_than_drifts() {
    // Crossing the limit mid-day: the estimate always reflects the
    // current total, not an accumulation of per-request deltas
    let db = TestDatabase::new().await;
    let ledger = UsageLedger::new(db.db_arc(), quota(3, 0.5));

    for expected_cost in [0.0, 0.0, 0.0, 0.5, 1.0] {
        ledger.record_outcome(true).await.unwrap();
        let usage = ledger
            .get_record(Utc::now().date_naive())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(usage.cost_usd_estimate, expected_cost);
    }
}
