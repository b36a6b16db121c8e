//! Provider call classification
//!
//! Every call through the client terminates in exactly one metrics result
//! or one of these errors. Callers pattern-match on the variants (and on
//! [`ProviderErrorKind`]) for retry decisions; message text carries no
//! semantics.

use thiserror::Error;

/// Sub-classification of a provider-level rejection by its error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The provider rejected the request as malformed (400)
    BadRequest,
    /// The credential was rejected (403)
    AuthError,
    /// The provider's own quota tripped (429)
    QuotaExceeded,
    /// Any other provider error code
    Other,
}

impl ProviderErrorKind {
    /// Map a provider error code to its kind
    pub fn from_code(code: u16) -> Self {
        match code {
            400 => Self::BadRequest,
            403 => Self::AuthError,
            429 => Self::QuotaExceeded,
            _ => Self::Other,
        }
    }
}

/// Outcome classification for a PSI test call
#[derive(Debug, Error)]
pub enum PsiError {
    /// Bad URL, bad strategy, or host mismatch; the caller's bug.
    /// Surfaces before any quota or ledger mutation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No API key configured. Surfaces before any quota or ledger mutation.
    #[error("PSI API key is not configured")]
    MissingCredential,

    /// Local admission rejection; the request never reached the provider
    /// and is not accounted. Retryable once the window rolls over.
    #[error("local rate limit exceeded")]
    RateLimitExceeded,

    /// The provider rejected the request, via an `error` body or a
    /// non-2xx status
    #[error("provider error (code {code}): {message}")]
    Provider {
        /// Classified kind driving retry decisions
        kind: ProviderErrorKind,
        /// The provider's error code (or HTTP status when no body code)
        code: u16,
        /// The provider's message, for humans only
        message: String,
    },

    /// Provider 5xx
    #[error("provider unavailable (HTTP {status})")]
    ServerUnavailable {
        /// HTTP status code
        status: u16,
    },

    /// Network-level failure; no response was received
    #[error("transport failure: {0}")]
    Transport(String),
}

impl PsiError {
    /// Whether a caller may reasonably retry this outcome after backoff.
    ///
    /// The client itself never retries; this informs the caller's policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimitExceeded | Self::ServerUnavailable { .. } | Self::Transport(_) => true,
            Self::Provider { kind, .. } => *kind == ProviderErrorKind::QuotaExceeded,
            Self::InvalidArgument(_) | Self::MissingCredential => false,
        }
    }
}
