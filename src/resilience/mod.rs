//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! LLM call:
//!     → retry.rs (classify error, retry transient faults with backoff)
//!     → circuit_breaker.rs (track failures, fail fast while the circuit is open)
//!     → On CircuitOpen: caller degrades to the built-in knowledge base (fallback::)
//! ```
//!
//! # Design Decisions
//! - Only transient provider faults are retried; unknown errors surface immediately
//! - A retry loop never retries into an open breaker
//! - Breakers live in a registry owned by the composition root, one per dependency name
//! - All resilience state is process-local; nothing survives a restart

pub mod backoff;
pub mod circuit_breaker;
pub mod registry;
pub mod retry;
pub mod status;

use std::time::Duration;

use thiserror::Error;

use crate::llm::error::LlmError;

pub use circuit_breaker::{BreakerSettings, CircuitBreaker, CircuitSnapshot, CircuitState};
pub use registry::{BreakerRegistry, LLM_BREAKER};
pub use retry::{retry_with_backoff, retry_with_circuit_breaker, RetryObserver, RetryPolicy};
pub use status::RetryStatus;

/// Terminal outcome of a protected call.
#[derive(Debug, Error)]
pub enum ResilienceError {
    /// The breaker denied execution; the provider was not contacted.
    #[error("circuit '{name}' is open, service appears down; next probe in {}s", .retry_in.as_secs())]
    CircuitOpen { name: String, retry_in: Duration },

    /// The retry budget ran out on a transient fault.
    #[error("retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: LlmError,
    },

    /// A non-retriable or unclassified error, surfaced on first occurrence.
    #[error(transparent)]
    Call(#[from] LlmError),
}
