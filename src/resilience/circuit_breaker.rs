//! Circuit breaker for LLM provider protection.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: provider assumed down, calls fail fast
//! - Half-Open: testing if the provider recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: failure_count >= threshold (consecutive tracked failures)
//! Open → Half-Open: after recovery timeout, when a call is attempted
//! Half-Open → Closed: probe call succeeds
//! Half-Open → Open: probe call fails
//! ```
//!
//! # Design Decisions
//! - Only transient (retriable) errors count as circuit failures; caller
//!   mistakes like a bad request pass through without touching the state
//! - Single probe in Half-Open; concurrent callers are denied until the
//!   probe resolves, and a probe older than the recovery timeout is treated
//!   as abandoned so a dead caller cannot wedge the breaker
//! - All transition sequences run under one mutex, never held across .await

use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::llm::error::{ErrorClass, LlmError};
use crate::observability::metrics;

use super::ResilienceError;

/// Breaker state.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed = 0,
    Open = 1,
    HalfOpen = 2,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        }
    }
}

/// Tuning for a single breaker.
#[derive(Debug, Clone, Copy)]
pub struct BreakerSettings {
    /// Consecutive tracked failures before the circuit opens.
    pub failure_threshold: u32,

    /// How long the circuit stays open before a probe is admitted.
    pub recovery_timeout: Duration,
}

impl Default for BreakerSettings {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(60),
        }
    }
}

/// Point-in-time view of a breaker, for status display and monitoring.
#[derive(Debug, Clone)]
pub struct CircuitSnapshot {
    pub name: String,
    pub state: CircuitState,
    pub failure_count: u32,
    pub success_count: u64,
    pub failure_threshold: u32,
    /// Time until the next probe is admitted; zero unless the circuit is open.
    pub remaining_recovery: Duration,
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    failure_count: u32,
    success_count: u64,
    last_failure: Option<Instant>,
    probe_started: Option<Instant>,
}

/// Three-state guard around calls to one external dependency.
///
/// Shared across concurrent callers via `Arc`; every caller observing the
/// same dependency must share the same instance so that failures seen by
/// any of them inform all of them.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    settings: BreakerSettings,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, settings: BreakerSettings) -> Self {
        let name = name.into();
        tracing::info!(
            breaker = %name,
            threshold = settings.failure_threshold,
            recovery_secs = settings.recovery_timeout.as_secs(),
            "circuit breaker created"
        );
        Self {
            name,
            settings,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                failure_count: 0,
                success_count: 0,
                last_failure: None,
                probe_started: None,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a call may proceed right now.
    ///
    /// In Open state this is also the probe admission point: once the
    /// recovery timeout has elapsed the breaker transitions to Half-Open
    /// and admits exactly one caller.
    pub fn can_execute(&self) -> bool {
        let mut inner = self.lock();
        self.admit(&mut inner)
    }

    /// Run `op` under breaker protection.
    ///
    /// Denied calls fail with [`ResilienceError::CircuitOpen`] carrying the
    /// estimated time until the next probe. Tracked failures update the
    /// breaker state; the original error is always re-surfaced.
    pub async fn execute<T, F, Fut>(&self, op: F) -> Result<T, ResilienceError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, LlmError>>,
    {
        {
            let mut inner = self.lock();
            if !self.admit(&mut inner) {
                let retry_in = self.remaining_recovery(&inner);
                drop(inner);
                tracing::warn!(
                    breaker = %self.name,
                    retry_in_secs = retry_in.as_secs(),
                    "call rejected, circuit open"
                );
                return Err(ResilienceError::CircuitOpen {
                    name: self.name.clone(),
                    retry_in,
                });
            }
        }

        match op().await {
            Ok(value) => {
                self.record_success();
                Ok(value)
            }
            Err(err) => {
                if err.class() == ErrorClass::Retriable {
                    self.record_failure(&err);
                } else {
                    tracing::debug!(
                        breaker = %self.name,
                        kind = err.kind(),
                        "untracked error passed through"
                    );
                }
                Err(ResilienceError::Call(err))
            }
        }
    }

    /// Current state, counters and remaining recovery time.
    pub fn snapshot(&self) -> CircuitSnapshot {
        let inner = self.lock();
        CircuitSnapshot {
            name: self.name.clone(),
            state: inner.state,
            failure_count: inner.failure_count,
            success_count: inner.success_count,
            failure_threshold: self.settings.failure_threshold,
            remaining_recovery: if inner.state == CircuitState::Open {
                self.remaining_recovery(&inner)
            } else {
                Duration::ZERO
            },
        }
    }

    /// Force the breaker back to Closed with zeroed failure tracking.
    /// Operator escape hatch; normal recovery goes through Half-Open.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.state = CircuitState::Closed;
        inner.failure_count = 0;
        inner.last_failure = None;
        inner.probe_started = None;
        tracing::info!(breaker = %self.name, "circuit breaker manually reset");
        metrics::record_breaker_state(&self.name, CircuitState::Closed);
    }

    fn admit(&self, inner: &mut BreakerInner) -> bool {
        match inner.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let recovered = inner
                    .last_failure
                    .map(|at| at.elapsed() >= self.settings.recovery_timeout)
                    .unwrap_or(false);
                if recovered {
                    inner.state = CircuitState::HalfOpen;
                    inner.probe_started = Some(Instant::now());
                    tracing::info!(breaker = %self.name, "recovery timeout elapsed, admitting probe");
                    metrics::record_breaker_state(&self.name, CircuitState::HalfOpen);
                    true
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => match inner.probe_started {
                Some(started) if started.elapsed() < self.settings.recovery_timeout => false,
                _ => {
                    // Previous probe abandoned; hand the slot to this caller.
                    inner.probe_started = Some(Instant::now());
                    true
                }
            },
        }
    }

    fn remaining_recovery(&self, inner: &BreakerInner) -> Duration {
        match inner.last_failure {
            Some(at) => self.settings.recovery_timeout.saturating_sub(at.elapsed()),
            None => Duration::ZERO,
        }
    }

    fn record_success(&self) {
        let mut inner = self.lock();
        inner.failure_count = 0;
        inner.success_count += 1;
        inner.probe_started = None;
        if inner.state == CircuitState::HalfOpen {
            inner.state = CircuitState::Closed;
            tracing::info!(breaker = %self.name, "probe succeeded, circuit closed");
            metrics::record_breaker_state(&self.name, CircuitState::Closed);
        }
    }

    fn record_failure(&self, err: &LlmError) {
        let mut inner = self.lock();
        inner.failure_count += 1;
        inner.last_failure = Some(Instant::now());
        inner.probe_started = None;
        match inner.state {
            CircuitState::HalfOpen => {
                inner.state = CircuitState::Open;
                tracing::warn!(breaker = %self.name, kind = err.kind(), "probe failed, circuit reopened");
                metrics::record_breaker_state(&self.name, CircuitState::Open);
            }
            CircuitState::Closed if inner.failure_count >= self.settings.failure_threshold => {
                inner.state = CircuitState::Open;
                tracing::warn!(
                    breaker = %self.name,
                    failures = inner.failure_count,
                    kind = err.kind(),
                    "failure threshold reached, circuit opened"
                );
                metrics::record_breaker_state(&self.name, CircuitState::Open);
            }
            _ => {}
        }
    }

    fn lock(&self) -> MutexGuard<'_, BreakerInner> {
        self.inner.lock().expect("circuit breaker mutex poisoned")
    }
}
