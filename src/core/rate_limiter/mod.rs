//! Two-window admission control
//!
//! Composes the counter store and the window keyer to answer "can I make
//! a provider call right now?" independently for a daily quota and a
//! per-minute burst limit.

mod limiter;
mod types;


pub use limiter::RateLimiter;
pub use types::UsageStats;
