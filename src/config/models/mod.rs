//! Configuration data models

pub mod http_client;
pub mod quota;
pub mod storage;
pub mod thresholds;
pub mod watcher;

pub use http_client::HttpClientConfig;
pub use quota::QuotaConfig;
pub use storage::{DatabaseConfig, RedisConfig, StorageConfig};
pub use thresholds::ScoreThresholds;
pub use watcher::WatcherConfig;

pub(crate) fn default_max_connections() -> u32 {
    10
}

pub(crate) fn default_connection_timeout() -> u64 {
    5
}
