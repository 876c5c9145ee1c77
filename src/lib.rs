//! Characterology Chat Service Library
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────────┐
//!                      │               CHAT SERVICE CORE                 │
//!                      │                                                 │
//!   User Question      │  ┌─────────┐    ┌────────────────────────────┐ │
//!   ──────────────────▶│  │  chat   │───▶│        resilience          │ │
//!                      │  │ engine  │    │  retry → circuit breaker   │ │
//!                      │  └────┬────┘    └─────────────┬──────────────┘ │
//!                      │       │                       │                │
//!                      │       │ CircuitOpen           ▼                │
//!                      │       ▼                ┌────────────┐          │
//!   Answer             │  ┌─────────┐           │    llm     │──────────┼──▶ LLM Provider
//!   ◀──────────────────│  │fallback │           │   client   │          │    (HTTP)
//!                      │  └─────────┘           └────────────┘          │
//!                      │                                                 │
//!                      │  ┌──────────────────────────────────────────┐  │
//!                      │  │         Cross-Cutting Concerns           │  │
//!                      │  │   ┌────────┐        ┌───────────────┐    │  │
//!                      │  │   │ config │        │ observability │    │  │
//!                      │  │   └────────┘        └───────────────┘    │  │
//!                      │  └──────────────────────────────────────────┘  │
//!                      └────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod chat;
pub mod fallback;
pub mod llm;
pub mod resilience;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use chat::{Answer, ChatEngine};
pub use config::AppConfig;
pub use fallback::{FallbackResponder, UserLevel};
pub use resilience::{BreakerRegistry, CircuitBreaker, ResilienceError};
