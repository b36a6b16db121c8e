//! Quota-governed PSI API client
//!
//! Validates inputs, enforces the rate limiter, issues the HTTP call,
//! classifies the outcome, and records usage to the ledger.

mod client;
mod error;
mod types;

pub use client::PsiClient;
pub use error::{ProviderErrorKind, PsiError};
pub use types::{Strategy, TestReport};
