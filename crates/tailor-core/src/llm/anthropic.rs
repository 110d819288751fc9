//! Anthropic Messages API backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{CompletionBackend, CompletionRequest, LlmError};
use crate::config::LlmConfig;

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AnthropicResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl AnthropicResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

pub struct AnthropicBackend {
    client: Client,
    api_key: String,
    model: String,
    url: String,
    timeout_secs: u64,
}

impl AnthropicBackend {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            url: config
                .base_url
                .clone()
                .unwrap_or_else(|| ANTHROPIC_API_URL.to_string()),
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl CompletionBackend for AnthropicBackend {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        let body = AnthropicRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            system: request.system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: request.prompt,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Anthropic API returned {}: {}", status, body);
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| classify_transport_error(e, self.timeout_secs))?;

        debug!(
            "Anthropic call succeeded: input_tokens={}, output_tokens={}",
            parsed.usage.input_tokens, parsed.usage.output_tokens
        );

        parsed
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

pub(crate) fn classify_transport_error(err: reqwest::Error, timeout_secs: u64) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout(timeout_secs)
    } else {
        LlmError::Http(err)
    }
}
