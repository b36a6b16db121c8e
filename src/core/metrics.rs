//! Metric extraction from PSI responses
//!
//! Pure mapping from the raw provider JSON to a normalized metrics
//! record. Every field is optional: a partially populated response is
//! not a failure, the missing metrics are simply absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized Core Web Vitals extracted from a PSI response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetrics {
    /// Performance score as a 0..1 fraction
    pub score: Option<f64>,
    /// Largest Contentful Paint, milliseconds
    pub lcp_ms: Option<i64>,
    /// Interaction to Next Paint, milliseconds
    pub inp_ms: Option<i64>,
    /// First Contentful Paint, milliseconds
    pub fcp_ms: Option<i64>,
    /// Time to First Byte (server response time), milliseconds
    pub ttfb_ms: Option<i64>,
    /// Max Potential First Input Delay, milliseconds
    pub fid_ms: Option<i64>,
    /// Cumulative Layout Shift, unitless
    pub cls: Option<f64>,
}

/// Extract normalized metrics from a raw PSI response body.
///
/// The score is kept as the provider's 0..1 fraction; converting to a
/// percentage is a presentation concern.
pub fn extract(raw: &Value) -> NormalizedMetrics {
    let lighthouse = &raw["lighthouseResult"];
    let audits = &lighthouse["audits"];

    NormalizedMetrics {
        score: lighthouse["categories"]["performance"]["score"].as_f64(),
        lcp_ms: audit_ms(audits, "largest-contentful-paint"),
        inp_ms: audit_ms(audits, "interaction-to-next-paint"),
        fcp_ms: audit_ms(audits, "first-contentful-paint"),
        ttfb_ms: audit_ms(audits, "server-response-time"),
        fid_ms: audit_ms(audits, "max-potential-fid"),
        cls: audits["cumulative-layout-shift"]["numericValue"].as_f64(),
    }
}

/// An audit's numericValue rounded to whole milliseconds
fn audit_ms(audits: &Value, name: &str) -> Option<i64> {
    audits[name]["numericValue"].as_f64().map(|v| v.round() as i64)
}
