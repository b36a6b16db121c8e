//! Logging initialization
//!
//! Sets up the tracing subscriber for the binary. Library code only emits
//! `tracing` events and never installs a subscriber on its own.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// The filter honors `RUST_LOG` when set and falls back to the given
/// default directive (e.g. `"info"`). Calling this twice is a no-op.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .try_init();
}
