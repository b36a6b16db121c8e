//! Client request and response types

use super::error::PsiError;
use crate::core::metrics::NormalizedMetrics;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Lighthouse analysis strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Simulated mobile device
    Mobile,
    /// Desktop viewport
    Desktop,
}

impl Strategy {
    /// Wire value for the `strategy` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PsiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Self::Mobile),
            "desktop" => Ok(Self::Desktop),
            other => Err(PsiError::InvalidArgument(format!(
                "invalid strategy {:?}, use \"mobile\" or \"desktop\"",
                other
            ))),
        }
    }
}

/// Result of a successful PSI test
#[derive(Debug, Clone)]
pub struct TestReport {
    /// Normalized metrics extracted from the response
    pub metrics: NormalizedMetrics,
    /// The raw response body, for callers that persist it
    pub raw: Value,
}
