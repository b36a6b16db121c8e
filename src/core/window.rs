//! Calendar window keying
//!
//! Pure functions deriving canonical window identifiers and boundary
//! instants from an explicit timestamp. The rate limiter keys its
//! counters by these identifiers; a counter expires exactly when its
//! window ends, so stale windows self-evict from the store.

use chrono::{DateTime, Utc};

/// Key for the daily window containing `t`, e.g. `"2026-08-07"`
pub fn daily_key(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d").to_string()
}

/// Key for the minute window containing `t`, e.g. `"2026-08-07-14-05"`
pub fn minute_key(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d-%H-%M").to_string()
}

/// First instant of the day after `t` (the daily counter's expiry)
pub fn end_of_day(t: DateTime<Utc>) -> DateTime<Utc> {
    let next_day = t
        .date_naive()
        .succ_opt()
        .expect("date overflow computing end of day");
    next_day
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc()
}

/// First instant of the minute after `t` (the minute counter's expiry)
pub fn end_of_minute(t: DateTime<Utc>) -> DateTime<Utc> {
    let secs = t.timestamp();
    let boundary = secs - secs.rem_euclid(60) + 60;
    DateTime::from_timestamp(boundary, 0).expect("timestamp overflow computing end of minute")
}
