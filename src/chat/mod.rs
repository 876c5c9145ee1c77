//! Question answering pipeline.

pub mod engine;

pub use engine::{user_facing_error, Answer, AnswerSource, ChatEngine};
