//! End-to-end tests against the live PSI API
//!
//! Run with `cargo test -- --ignored` and `PSI_API_KEY` set.

pub mod live_psi;
