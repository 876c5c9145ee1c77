//! Question answering with graceful degradation.
//!
//! The engine is the caller of the resilience layer: every question runs
//! through retry + circuit breaker, terminal errors map to localized user
//! messages, and an open circuit degrades to the built-in knowledge base
//! instead of an error.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::fallback::{FallbackResponder, UserLevel};
use crate::llm::{ChatClient, LlmError};
use crate::observability::metrics;
use crate::resilience::{
    retry_with_circuit_breaker, CircuitBreaker, ResilienceError, RetryPolicy, RetryStatus,
};

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// The model answered.
    Model,
    /// Degraded mode: canned content from the knowledge base.
    Fallback,
    /// A terminal error, rendered as a user-facing message.
    Error,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::Model => "model",
            AnswerSource::Fallback => "fallback",
            AnswerSource::Error => "error",
        }
    }
}

/// One answered question.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
    /// Service availability line to display alongside degraded answers.
    pub status_line: Option<String>,
    pub request_id: Uuid,
}

impl Answer {
    pub fn is_degraded(&self) -> bool {
        self.source != AnswerSource::Model
    }
}

/// QA pipeline: client call under retry + breaker, fallback on open circuit.
pub struct ChatEngine<C> {
    client: C,
    breaker: Arc<CircuitBreaker>,
    policy: RetryPolicy,
    fallback: FallbackResponder,
}

impl<C: ChatClient> ChatEngine<C> {
    pub fn new(client: C, breaker: Arc<CircuitBreaker>, policy: RetryPolicy) -> Self {
        Self {
            client,
            breaker,
            policy,
            fallback: FallbackResponder::new(),
        }
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    pub fn fallback(&self) -> &FallbackResponder {
        &self.fallback
    }

    /// Answer one question.
    pub async fn ask(&self, question: &str, level: UserLevel) -> Answer {
        let request_id = Uuid::new_v4();
        tracing::info!(%request_id, question_chars = question.chars().count(), "processing question");

        let mut status = RetryStatus::new();
        status.start_retry(self.policy.max_retries);

        let mut observer = |attempt: u32, error: &LlmError, delay: Duration| {
            status.on_retry_attempt(attempt, error, delay);
            tracing::info!(%request_id, progress = %status.status_message(), "retrying");
        };

        let result = retry_with_circuit_breaker(
            self.policy,
            &self.breaker,
            || self.client.complete(question),
            Some(&mut observer),
        )
        .await;

        match result {
            Ok(text) => {
                status.finish_retry(true);
                metrics::record_answer("model");
                tracing::info!(%request_id, "answer served by model");
                Answer {
                    text,
                    source: AnswerSource::Model,
                    status_line: None,
                    request_id,
                }
            }
            Err(ResilienceError::CircuitOpen { name, retry_in }) => {
                status.finish_retry(false);
                metrics::record_answer("fallback");
                tracing::warn!(
                    %request_id,
                    breaker = %name,
                    retry_in_secs = retry_in.as_secs(),
                    "provider unavailable, serving fallback"
                );
                let text = self.fallback.respond(question, level);
                let status_line = self.fallback.service_status_message(&self.breaker.snapshot());
                Answer {
                    text,
                    source: AnswerSource::Fallback,
                    status_line: Some(status_line),
                    request_id,
                }
            }
            Err(err) => {
                status.finish_retry(false);
                metrics::record_answer("error");
                tracing::error!(%request_id, error = %err, "question failed");
                Answer {
                    text: user_facing_error(&err),
                    source: AnswerSource::Error,
                    status_line: None,
                    request_id,
                }
            }
        }
    }
}

/// Localized message for a terminal error, distinct per kind.
pub fn user_facing_error(err: &ResilienceError) -> String {
    let cause = match err {
        ResilienceError::RetriesExhausted { source, .. } => source,
        ResilienceError::Call(source) => source,
        ResilienceError::CircuitOpen { .. } => {
            return "Le service IA est temporairement indisponible. Réessayez dans quelques instants."
                .to_string();
        }
    };

    match cause {
        LlmError::RateLimited { .. } => {
            "Le service IA est très sollicité en ce moment. Merci de patienter quelques instants \
             avant de reposer votre question."
        }
        LlmError::Connection(_) | LlmError::Timeout { .. } | LlmError::Server { .. } => {
            "Le service IA ne répond pas pour le moment. Veuillez réessayer dans quelques instants."
        }
        LlmError::Auth(_) => {
            "Le service est mal configuré (clé API invalide). Merci de contacter l'administrateur."
        }
        LlmError::InvalidRequest(_) => {
            "Votre question n'a pas pu être traitée par le service IA. Essayez de la reformuler."
        }
        LlmError::ContentFiltered => {
            "Votre question a été bloquée par le filtre de contenu du service IA. Essayez de la \
             reformuler."
        }
        LlmError::Other(_) => {
            "Je suis désolé, mais j'ai rencontré une erreur lors du traitement de votre question. \
             Pourriez-vous réessayer?"
        }
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_distinct_per_kind() {
        let rate_limited = ResilienceError::RetriesExhausted {
            attempts: 4,
            source: LlmError::RateLimited { retry_after_secs: None },
        };
        let auth = ResilienceError::Call(LlmError::Auth("bad key".to_string()));
        let unknown = ResilienceError::Call(LlmError::Other("?".to_string()));

        let messages = [
            user_facing_error(&rate_limited),
            user_facing_error(&auth),
            user_facing_error(&unknown),
        ];
        for message in &messages {
            assert!(!message.is_empty());
        }
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }

    #[test]
    fn test_answer_degradation_flag() {
        let answer = Answer {
            text: "ok".to_string(),
            source: AnswerSource::Model,
            status_line: None,
            request_id: Uuid::new_v4(),
        };
        assert!(!answer.is_degraded());

        let degraded = Answer {
            source: AnswerSource::Fallback,
            ..answer
        };
        assert!(degraded.is_degraded());
    }
}
