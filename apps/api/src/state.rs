use std::sync::Arc;

use tailor_core::Tailor;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only pipeline: LLM backend, text extractor.
    pub tailor: Arc<Tailor>,
    pub config: Config,
}
