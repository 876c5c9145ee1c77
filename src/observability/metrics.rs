//! Metrics collection and exposition.
//!
//! # Metrics
//! - `llm_retries_total` (counter): retried attempts by error kind
//! - `chat_answers_total` (counter): answers by source (model/fallback/error)
//! - `fallback_responses_total` (counter): fallback responses by question category
//! - `circuit_breaker_state` (gauge): 0=closed, 1=open, 2=half-open, per breaker
//! - `circuit_breaker_transitions_total` (counter): transitions by breaker and target state
//!
//! # Design Decisions
//! - Recording helpers are plain functions callable from any module;
//!   with no exporter installed they are no-ops
//! - Prometheus exposition is optional and bound to a separate address

use std::net::SocketAddr;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::resilience::CircuitState;

/// Install the Prometheus exporter and register metric descriptions.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!("llm_retries_total", "Retried LLM attempts by error kind");
            describe_counter!("chat_answers_total", "Answers served, by source");
            describe_counter!(
                "fallback_responses_total",
                "Fallback responses served, by question category"
            );
            describe_gauge!(
                "circuit_breaker_state",
                "Circuit breaker state: 0=closed, 1=open, 2=half-open"
            );
            describe_counter!(
                "circuit_breaker_transitions_total",
                "Circuit breaker state transitions, by breaker and target state"
            );
            tracing::info!(address = %addr, "metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to install metrics exporter");
        }
    }
}

pub fn record_retry(kind: &'static str) {
    counter!("llm_retries_total", "kind" => kind).increment(1);
}

pub fn record_answer(source: &'static str) {
    counter!("chat_answers_total", "source" => source).increment(1);
}

pub fn record_fallback(category: &'static str) {
    counter!("fallback_responses_total", "category" => category).increment(1);
}

pub fn record_breaker_state(breaker: &str, state: CircuitState) {
    gauge!("circuit_breaker_state", "breaker" => breaker.to_string()).set(state as u8 as f64);
    counter!("circuit_breaker_transitions_total", "breaker" => breaker.to_string(), "to" => state.as_str())
        .increment(1);
}
