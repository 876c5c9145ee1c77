//! Graceful degradation subsystem.
//!
//! # Data Flow
//! ```text
//! CircuitOpen caught by the chat engine
//!     → responder.rs (categorize the question, assemble a canned answer)
//!     → knowledge.rs (static characterology content, loaded at compile time)
//! ```
//!
//! # Design Decisions
//! - The responder never fails; it is the last line of defense
//! - Degradation is an explicit caller decision, never an automatic
//!   substitution inside the retry/breaker logic
//! - Content is compiled in; no I/O on the degraded path

pub mod knowledge;
pub mod responder;

pub use responder::{FallbackResponder, QuestionCategory, UserLevel};
