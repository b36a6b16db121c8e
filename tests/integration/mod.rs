//! Integration tests for pagespeed-watcher
//!
//! These tests verify the interaction between components: the client
//! against a mock PSI endpoint, the ledger against real SQLite, and the
//! limiter over a shared counter store.

pub mod config_tests;
pub mod ledger_tests;
pub mod rate_limiter_tests;
