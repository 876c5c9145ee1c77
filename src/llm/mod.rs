//! LLM provider integration.
//!
//! # Responsibilities
//! - Provider-agnostic error taxonomy with retry classification
//! - Chat completion client for OpenAI-compatible endpoints
//! - System prompt for the characterology tutor persona
//!
//! # Design Decisions
//! - The resilience core depends only on [`error::LlmError`]; HTTP status
//!   codes and provider specifics are interpreted here and nowhere else
//! - Per-call timeout is owned by the HTTP client, not by the retry loop

pub mod client;
pub mod error;
pub mod prompt;

pub use client::{ChatClient, OpenAiChatClient};
pub use error::{ErrorClass, LlmError};
