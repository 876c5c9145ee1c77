//! Chat completion client for OpenAI-compatible endpoints.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::LlmConfig;

use super::error::LlmError;
use super::prompt::SYSTEM_PROMPT;

/// A chat backend capable of answering a single prompt.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Run one completion. The per-call HTTP deadline lives inside the
    /// implementation; callers compose retries and breakers around this.
    async fn complete(&self, question: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl<T: ChatClient + ?Sized> ChatClient for std::sync::Arc<T> {
    async fn complete(&self, question: &str) -> Result<String, LlmError> {
        (**self).complete(question).await
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// HTTP client for any OpenAI-compatible chat completion endpoint.
pub struct OpenAiChatClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
}

impl OpenAiChatClient {
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self, LlmError> {
        // Url::join drops the last path segment without a trailing slash.
        let mut base = config.api_base.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)
            .and_then(|url| url.join("chat/completions"))
            .map_err(|e| LlmError::InvalidRequest(format!("invalid api_base '{}': {e}", config.api_base)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LlmError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.request_timeout_secs,
        })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout { secs: self.timeout_secs }
        } else if err.is_connect() {
            LlmError::Connection(err.to_string())
        } else {
            LlmError::Other(err.to_string())
        }
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, question: &str) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: question },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok());
            let message = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), retry_after, &message));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Other(format!("malformed provider response: {e}")))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Other("provider returned no choices".to_string()))?;

        if choice.finish_reason.as_deref() == Some("content_filter") {
            return Err(LlmError::ContentFiltered);
        }

        choice
            .message
            .content
            .ok_or_else(|| LlmError::Other("provider returned an empty message".to_string()))
    }
}

/// Map an HTTP error status onto the error taxonomy.
fn classify_status(status: u16, retry_after_secs: Option<u64>, body: &str) -> LlmError {
    let message = extract_error_message(body);
    match status {
        429 => LlmError::RateLimited { retry_after_secs },
        401 | 403 => LlmError::Auth(message),
        400 | 404 | 413 | 422 => LlmError::InvalidRequest(message),
        500..=599 => LlmError::Server { status, message },
        _ => LlmError::Other(format!("unexpected status {status}: {message}")),
    }
}

/// Pull the human-readable message out of the provider's JSON error
/// envelope, falling back to the raw body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .map(|detail| detail.message)
        .unwrap_or_else(|| truncate(body))
}

// Error bodies end up in log lines; keep them short.
fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}
