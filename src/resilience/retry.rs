//! Retry with exponential backoff, optionally composed with a circuit breaker.
//!
//! # Responsibilities
//! - Retry transient provider faults up to a configured budget
//! - Surface permanent and unclassified errors immediately
//! - Fail fast when the circuit breaker denies execution
//!
//! # Design Decisions
//! - Unknown errors are never retried; backoff must not mask programming errors
//! - The observer hook only records progress, the sleep belongs to this loop
//! - A CircuitOpen rejection is never retried: retrying into an open breaker
//!   would defeat its purpose

use std::future::Future;
use std::time::Duration;

use crate::llm::error::{ErrorClass, LlmError};
use crate::observability::metrics;

use super::backoff::backoff_delay;
use super::circuit_breaker::CircuitBreaker;
use super::ResilienceError;

/// Retry tuning for one protected operation.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,

    /// Base delay for exponential backoff.
    pub base_delay: Duration,

    /// Cap on the backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Total number of tries including the initial attempt.
    pub fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// Observer invoked before each backoff sleep with the 1-based retry number,
/// the error that triggered it, and the computed delay. Must return promptly.
pub type RetryObserver<'a> = &'a mut (dyn FnMut(u32, &LlmError, Duration) + Send);

/// Run `op` up to `max_retries + 1` times with jittered exponential backoff.
///
/// Transient errors are retried; everything else surfaces on first
/// occurrence. Exhausting the budget yields
/// [`ResilienceError::RetriesExhausted`] wrapping the last transient error.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    mut op: F,
    mut on_retry: Option<RetryObserver<'_>>,
) -> Result<T, ResilienceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => {
                log_recovery(attempt);
                return Ok(value);
            }
            Err(cause) => {
                let outcome = next_delay_or_terminal(
                    policy,
                    attempt,
                    ResilienceError::Call(cause),
                    &mut on_retry,
                );
                match outcome {
                    Ok(delay) => {
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    Err(err) => return Err(err),
                }
            }
        }
    }
}

/// Like [`retry_with_backoff`], but every attempt goes through `breaker`.
///
/// A [`ResilienceError::CircuitOpen`] rejection propagates immediately and
/// is explicitly not retried.
pub async fn retry_with_circuit_breaker<T, F, Fut>(
    policy: RetryPolicy,
    breaker: &CircuitBreaker,
    mut op: F,
    mut on_retry: Option<RetryObserver<'_>>,
) -> Result<T, ResilienceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match breaker.execute(&mut op).await {
            Ok(value) => {
                log_recovery(attempt);
                return Ok(value);
            }
            Err(err) => match next_delay_or_terminal(policy, attempt, err, &mut on_retry) {
                Ok(delay) => {
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            },
        }
    }
}

fn log_recovery(attempt: u32) {
    if attempt > 0 {
        tracing::info!(retries = attempt, "call succeeded after retries");
    }
}

/// Decide what a failed attempt means: a delay before the next try, or a
/// terminal error for the caller.
fn next_delay_or_terminal(
    policy: RetryPolicy,
    attempt: u32,
    err: ResilienceError,
    on_retry: &mut Option<RetryObserver<'_>>,
) -> Result<Duration, ResilienceError> {
    let cause = match err {
        // Fast-fail: never retry into an open breaker.
        open @ ResilienceError::CircuitOpen { .. } => return Err(open),
        exhausted @ ResilienceError::RetriesExhausted { .. } => return Err(exhausted),
        ResilienceError::Call(cause) => cause,
    };

    match cause.class() {
        ErrorClass::Retriable => {
            metrics::record_retry(cause.kind());
            if attempt == policy.max_retries {
                tracing::error!(
                    attempts = policy.total_attempts(),
                    kind = cause.kind(),
                    error = %cause,
                    "retries exhausted"
                );
                return Err(ResilienceError::RetriesExhausted {
                    attempts: policy.total_attempts(),
                    source: cause,
                });
            }

            let delay = backoff_delay(attempt, policy.base_delay, policy.max_delay);
            tracing::warn!(
                attempt = attempt + 1,
                kind = cause.kind(),
                delay_ms = delay.as_millis() as u64,
                "transient provider error, backing off"
            );
            if let Some(observer) = on_retry.as_mut() {
                observer(attempt + 1, &cause, delay);
            }
            Ok(delay)
        }
        ErrorClass::NonRetriable => {
            tracing::warn!(kind = cause.kind(), error = %cause, "non-retriable error, giving up");
            Err(ResilienceError::Call(cause))
        }
        ErrorClass::Unknown => {
            tracing::error!(kind = cause.kind(), error = %cause, "unclassified error, not retrying");
            Err(ResilienceError::Call(cause))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::BreakerSettings;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(20),
        }
    }

    #[tokio::test]
    async fn test_retriable_exhaustion_invokes_all_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_backoff(
            fast_policy(3),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(LlmError::RateLimited { retry_after_secs: None }) }
            },
            None,
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        match result {
            Err(ResilienceError::RetriesExhausted { attempts, source }) => {
                assert_eq!(attempts, 4);
                assert!(matches!(source, LlmError::RateLimited { .. }));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_retriable_invoked_once() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_backoff(
            fast_policy(5),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(LlmError::Auth("invalid key".to_string())) }
            },
            None,
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ResilienceError::Call(LlmError::Auth(_)))));
    }

    #[tokio::test]
    async fn test_unknown_error_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_backoff(
            fast_policy(5),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(LlmError::Other("segfault in provider sdk".to_string())) }
            },
            None,
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ResilienceError::Call(LlmError::Other(_)))));
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff(
            fast_policy(2),
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(LlmError::Timeout { secs: 1 })
                    } else {
                        Ok("answer")
                    }
                }
            },
            None,
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(result.unwrap(), "answer");
    }

    #[tokio::test]
    async fn test_observer_sees_each_retry() {
        let mut seen: Vec<(u32, &'static str)> = Vec::new();
        let mut observer = |attempt: u32, error: &LlmError, delay: Duration| {
            assert!(delay >= Duration::from_millis(5));
            seen.push((attempt, error.kind()));
        };

        let calls = AtomicU32::new(0);
        let _: Result<(), _> = retry_with_backoff(
            fast_policy(2),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(LlmError::Connection("reset".to_string())) }
            },
            Some(&mut observer),
        )
        .await;

        assert_eq!(seen, vec![(1, "Connection"), (2, "Connection")]);
    }

    #[tokio::test]
    async fn test_coordinator_fast_fails_on_open_breaker() {
        let breaker = CircuitBreaker::new(
            "coordinator-test",
            BreakerSettings {
                failure_threshold: 1,
                recovery_timeout: Duration::from_secs(60),
            },
        );
        let _: Result<(), _> = breaker
            .execute(|| async { Err(LlmError::Connection("down".to_string())) })
            .await;

        let calls = AtomicU32::new(0);
        let started = Instant::now();
        let result: Result<(), _> = retry_with_circuit_breaker(
            fast_policy(3),
            &breaker,
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }
            },
            None,
        )
        .await;

        assert!(matches!(result, Err(ResilienceError::CircuitOpen { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0, "wrapped call must not run");
        assert!(started.elapsed() < Duration::from_millis(100), "no backoff sleep on fast-fail");
    }

    #[tokio::test]
    async fn test_coordinator_failures_trip_breaker() {
        let breaker = CircuitBreaker::new(
            "trip-test",
            BreakerSettings {
                failure_threshold: 3,
                recovery_timeout: Duration::from_secs(60),
            },
        );

        let result: Result<(), _> = retry_with_circuit_breaker(
            fast_policy(2),
            &breaker,
            || async {
                Err(LlmError::Server { status: 503, message: "unavailable".to_string() })
            },
            None,
        )
        .await;

        // Three attempts against a threshold of three: the loop's own
        // failures opened the circuit.
        assert!(matches!(result, Err(ResilienceError::RetriesExhausted { attempts: 3, .. })));
        assert_eq!(breaker.snapshot().state, crate::resilience::CircuitState::Open);
    }
}
