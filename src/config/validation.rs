//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, thresholds > 0, delays ordered)
//! - Check that addresses and URLs actually parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use super::schema::AppConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("llm.api_base is not a valid URL: {0}")]
    InvalidApiBase(String),

    #[error("llm.temperature must be within 0.0..=2.0, got {0}")]
    TemperatureOutOfRange(f32),

    #[error("llm.max_tokens must be greater than 0")]
    ZeroMaxTokens,

    #[error("llm.request_timeout_secs must be greater than 0")]
    ZeroRequestTimeout,

    #[error("resilience.base_delay_ms ({base}) must not exceed max_delay_ms ({max})")]
    DelayRangeInverted { base: u64, max: u64 },

    #[error("resilience.failure_threshold must be greater than 0")]
    ZeroFailureThreshold,

    #[error("resilience.recovery_timeout_secs must be greater than 0")]
    ZeroRecoveryTimeout,

    #[error("observability.metrics_address is not a valid socket address: {0}")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration, collecting every violation.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if Url::parse(&config.llm.api_base).is_err() {
        errors.push(ValidationError::InvalidApiBase(config.llm.api_base.clone()));
    }
    if !(0.0..=2.0).contains(&config.llm.temperature) {
        errors.push(ValidationError::TemperatureOutOfRange(config.llm.temperature));
    }
    if config.llm.max_tokens == 0 {
        errors.push(ValidationError::ZeroMaxTokens);
    }
    if config.llm.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.resilience.base_delay_ms > config.resilience.max_delay_ms {
        errors.push(ValidationError::DelayRangeInverted {
            base: config.resilience.base_delay_ms,
            max: config.resilience.max_delay_ms,
        });
    }
    if config.resilience.failure_threshold == 0 {
        errors.push(ValidationError::ZeroFailureThreshold);
    }
    if config.resilience.recovery_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRecoveryTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
