//! Redis storage (shared counter store)

mod counters;
mod pool;

pub use counters::RedisCounterStore;
pub use pool::RedisPool;
