//! Provider-agnostic error taxonomy for LLM calls.
//!
//! # Responsibilities
//! - Represent every failure mode of a chat completion call without leaking
//!   provider SDK types into the rest of the crate
//! - Classify each kind as retriable, non-retriable, or unknown
//!
//! # Design Decisions
//! - Classification lives in exactly one place ([`LlmError::class`])
//! - Unknown errors are classified as not retriable so a programming error
//!   cannot hide behind backoff

use thiserror::Error;

/// Failure of a single LLM provider call.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// Provider throttled the request.
    #[error("provider rate limit hit")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Could not reach the provider at all.
    #[error("connection to provider failed: {0}")]
    Connection(String),

    /// The call exceeded the client-side deadline.
    #[error("provider call timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Provider-side failure (5xx).
    #[error("provider internal error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Credentials rejected.
    #[error("authentication rejected by provider: {0}")]
    Auth(String),

    /// The provider refused the request itself.
    #[error("provider rejected the request: {0}")]
    InvalidRequest(String),

    /// The completion was blocked by the provider's content policy.
    #[error("response blocked by provider content filter")]
    ContentFiltered,

    /// Anything the client could not attribute to a known kind.
    #[error("unexpected provider error: {0}")]
    Other(String),
}

/// Retry classification of an [`LlmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Transient provider fault; retrying has a reasonable chance to succeed.
    Retriable,
    /// Permanent caller-side fault; retrying cannot succeed.
    NonRetriable,
    /// Uncategorized; treated conservatively as not worth retrying.
    Unknown,
}

impl LlmError {
    pub fn class(&self) -> ErrorClass {
        match self {
            LlmError::RateLimited { .. }
            | LlmError::Connection(_)
            | LlmError::Timeout { .. }
            | LlmError::Server { .. } => ErrorClass::Retriable,

            LlmError::Auth(_) | LlmError::InvalidRequest(_) | LlmError::ContentFiltered => {
                ErrorClass::NonRetriable
            }

            LlmError::Other(_) => ErrorClass::Unknown,
        }
    }

    /// Short stable name for logs, metrics and status lines.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::RateLimited { .. } => "RateLimited",
            LlmError::Connection(_) => "Connection",
            LlmError::Timeout { .. } => "Timeout",
            LlmError::Server { .. } => "ServerError",
            LlmError::Auth(_) => "Authentication",
            LlmError::InvalidRequest(_) => "InvalidRequest",
            LlmError::ContentFiltered => "ContentFiltered",
            LlmError::Other(_) => "Other",
        }
    }
}
