//! Caller-facing retry progress tracking.
//!
//! Purely presentational: the chat UI polls this to show "retrying…"
//! feedback while a call is in flight. It has no influence on retry
//! decisions.

use std::time::Duration;

use crate::llm::error::LlmError;

/// Progress of one retried operation.
///
/// Constructed per user-facing operation, fed from the retry loop's
/// observer hook, and discarded when the operation finishes.
#[derive(Debug, Clone, Default)]
pub struct RetryStatus {
    is_retrying: bool,
    current_attempt: u32,
    max_attempts: u32,
    last_error: Option<LlmError>,
    next_delay: Duration,
}

impl RetryStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin tracking a new retry sequence.
    pub fn start_retry(&mut self, max_attempts: u32) {
        self.is_retrying = true;
        self.current_attempt = 0;
        self.max_attempts = max_attempts;
        self.last_error = None;
        self.next_delay = Duration::ZERO;
    }

    /// Record one retry attempt; wire this to the retry loop's observer hook.
    pub fn on_retry_attempt(&mut self, attempt: u32, error: &LlmError, next_delay: Duration) {
        self.current_attempt = attempt;
        self.last_error = Some(error.clone());
        self.next_delay = next_delay;
    }

    /// End the sequence. On failure the last error is kept for display.
    pub fn finish_retry(&mut self, success: bool) {
        self.is_retrying = false;
        if success {
            self.current_attempt = 0;
            self.last_error = None;
        }
    }

    pub fn is_retrying(&self) -> bool {
        self.is_retrying
    }

    pub fn last_error(&self) -> Option<&LlmError> {
        self.last_error.as_ref()
    }

    /// Human-readable progress line, empty when no retry is in flight.
    pub fn status_message(&self) -> String {
        if !self.is_retrying {
            return String::new();
        }

        let kind = self.last_error.as_ref().map(LlmError::kind).unwrap_or("Erreur");

        if self.next_delay > Duration::ZERO {
            format!(
                "🔄 **Nouvelle tentative** ({kind}) - Tentative {}/{} dans {:.1}s",
                self.current_attempt,
                self.max_attempts,
                self.next_delay.as_secs_f64()
            )
        } else {
            format!(
                "🔄 **Nouvelle tentative** ({kind}) - Tentative {}/{}",
                self.current_attempt, self.max_attempts
            )
        }
    }
}
