//! Shared helpers for integration tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use characterology_chat::llm::{ChatClient, LlmError};

/// Chat client producing a scripted sequence of outcomes.
///
/// Once the script runs out the last entry repeats, so "always failing"
/// scenarios are a one-entry script.
pub struct ScriptedClient {
    script: Mutex<Vec<Result<String, LlmError>>>,
    calls: AtomicU32,
}

impl ScriptedClient {
    pub fn new(script: Vec<Result<String, LlmError>>) -> Self {
        assert!(!script.is_empty(), "script must have at least one outcome");
        Self {
            script: Mutex::new(script),
            calls: AtomicU32::new(0),
        }
    }

    pub fn always_failing(error: LlmError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Number of times `complete` was invoked.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn complete(&self, _question: &str) -> Result<String, LlmError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        let script = self.script.lock().expect("script mutex poisoned");
        let index = n.min(script.len() - 1);
        script[index].clone()
    }
}
