//! Resume text extraction.
//!
//! PDF parsing is CPU-bound and the parser can panic on malformed input, so
//! it runs inside `spawn_blocking`, which turns a panic into a `JoinError`
//! instead of taking down the worker.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Failed(String),

    #[error("text extraction timed out after {0}s")]
    Timeout(u64),

    #[error("the document could not be parsed")]
    Panicked,
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: Vec<u8>) -> Result<String, ExtractError>;
}

/// Extracts text from PDF bytes with `pdf-extract`.
pub struct PdfTextExtractor {
    timeout: Duration,
}

impl PdfTextExtractor {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<String, ExtractError> {
        let size = bytes.len();
        let task = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes));

        let joined = tokio::time::timeout(self.timeout, task)
            .await
            .map_err(|_| ExtractError::Timeout(self.timeout.as_secs()))?;

        let text = joined
            .map_err(|_| ExtractError::Panicked)?
            .map_err(|e| ExtractError::Failed(e.to_string()))?;

        debug!(bytes = size, chars = text.len(), "extracted resume text");
        Ok(text.trim().to_string())
    }
}
