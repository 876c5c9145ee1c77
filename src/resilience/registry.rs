//! Named circuit breaker registry.
//!
//! One breaker per protected dependency, keyed by name. The registry is
//! created once at the composition root and injected into callers, so every
//! caller sharing a dependency shares its breaker state.

use std::sync::Arc;

use dashmap::DashMap;

use super::circuit_breaker::{BreakerSettings, CircuitBreaker, CircuitSnapshot};

/// Name of the breaker guarding the LLM provider.
pub const LLM_BREAKER: &str = "openai";

#[derive(Debug, Default)]
pub struct BreakerRegistry {
    breakers: DashMap<String, Arc<CircuitBreaker>>,
}

impl BreakerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the breaker for `name`, creating it with `settings` on first use.
    /// Settings of an existing breaker are left untouched.
    pub fn get_or_create(&self, name: &str, settings: BreakerSettings) -> Arc<CircuitBreaker> {
        self.breakers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(CircuitBreaker::new(name, settings)))
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<Arc<CircuitBreaker>> {
        self.breakers.get(name).map(|entry| entry.clone())
    }

    /// Snapshot every registered breaker, for status display.
    pub fn snapshots(&self) -> Vec<CircuitSnapshot> {
        self.breakers.iter().map(|entry| entry.snapshot()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_instance() {
        let registry = BreakerRegistry::new();
        let a = registry.get_or_create(LLM_BREAKER, BreakerSettings::default());
        let b = registry.get_or_create(LLM_BREAKER, BreakerSettings::default());
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_distinct_names_independent() {
        let registry = BreakerRegistry::new();
        let a = registry.get_or_create("openai", BreakerSettings::default());
        let b = registry.get_or_create("langfuse", BreakerSettings::default());
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.snapshots().len(), 2);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let registry = BreakerRegistry::new();
        assert!(registry.get("nope").is_none());
    }
}
