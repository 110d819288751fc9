/// LLM Client — the single point of entry for all model calls in the tailor.
///
/// No other module talks to a provider API directly. Providers implement
/// [`CompletionBackend`]; callers go through [`LlmClient`], which adds
/// fence-stripping and JSON decoding on top.
///
/// Every call is a single attempt. Retry policy belongs to whoever invokes the
/// pipeline.
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub mod anthropic;
pub mod openrouter;

pub use anthropic::AnthropicBackend;
pub use openrouter::OpenRouterBackend;

use crate::config::{LlmConfig, LlmProvider};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One prompt, one answer.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: Option<&'a str>,
    pub prompt: &'a str,
    pub max_tokens: u32,
}

/// A provider that turns a prompt into free text.
///
/// Carried as `Arc<dyn CompletionBackend>` so the pipeline can be driven by a
/// scripted backend in tests.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Returns the text of the model's answer.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError>;

    /// Provider label for logs.
    fn name(&self) -> &'static str;
}

/// Builds the backend selected by configuration.
pub fn backend_from_config(config: &LlmConfig) -> Result<Arc<dyn CompletionBackend>, LlmError> {
    let backend: Arc<dyn CompletionBackend> = match config.provider {
        LlmProvider::Anthropic => Arc::new(AnthropicBackend::new(config)?),
        LlmProvider::OpenRouter => Arc::new(OpenRouterBackend::new(config)?),
    };
    Ok(backend)
}

#[derive(Clone)]
pub struct LlmClient {
    backend: Arc<dyn CompletionBackend>,
}

impl LlmClient {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    pub fn provider(&self) -> &'static str {
        self.backend.name()
    }

    /// Makes a raw call and returns the answer text with surrounding
    /// whitespace removed.
    pub async fn call(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        let text = self.backend.complete(request).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        debug!(
            provider = self.backend.name(),
            chars = text.len(),
            "LLM call returned"
        );
        Ok(text.to_string())
    }

    /// Calls the LLM and deserializes the answer as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        request: CompletionRequest<'_>,
    ) -> Result<T, LlmError> {
        let text = self.call(request).await?;
        serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}
