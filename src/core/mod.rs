//! Core watcher components
//!
//! The admission-control and accounting engine: window keying, counter
//! stores, the rate limiter, the durable usage ledger, the PSI client
//! and the metric extractor.

pub mod client;
pub mod counters;
pub mod ledger;
pub mod metrics;
pub mod rate_limiter;
pub mod window;
