use thiserror::Error;

use crate::extract::ExtractError;
use crate::llm::LlmError;

/// Typst rejected the generated template or could not export it.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("typst compilation failed: {0}")]
    Compilation(String),

    #[error("PDF export failed: {0}")]
    Export(String),
}

/// Terminal failure of one tailoring run.
///
/// Adapters map this onto their own response shape; `status_code` gives the
/// HTTP-equivalent class (400 for caller input, 500 for everything upstream
/// or internal).
#[derive(Debug, Error)]
pub enum TailorError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Could not extract text from resume: {0}")]
    InvalidResume(String),

    #[error("AI service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Failed to parse AI response: {0}")]
    UpstreamMalformed(String),

    #[error("Failed to render resume: {0}")]
    RenderFailure(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TailorError {
    pub fn status_code(&self) -> u16 {
        match self {
            TailorError::InvalidInput(_) | TailorError::InvalidResume(_) => 400,
            TailorError::UpstreamUnavailable(_)
            | TailorError::UpstreamMalformed(_)
            | TailorError::RenderFailure(_)
            | TailorError::Configuration(_) => 500,
        }
    }

    /// Short machine-readable label, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TailorError::InvalidInput(_) => "invalid_input",
            TailorError::InvalidResume(_) => "invalid_resume",
            TailorError::UpstreamUnavailable(_) => "upstream_unavailable",
            TailorError::UpstreamMalformed(_) => "upstream_malformed",
            TailorError::RenderFailure(_) => "render_failure",
            TailorError::Configuration(_) => "configuration",
        }
    }
}

/// The LLM answered but its payload could not be turned into the model.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("expected a JSON object at the top level, found {0}")]
    MalformedResponse(&'static str),
}

impl From<ValidationError> for TailorError {
    fn from(err: ValidationError) -> Self {
        TailorError::UpstreamMalformed(err.to_string())
    }
}

impl From<LlmError> for TailorError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(e) => TailorError::UpstreamMalformed(e.to_string()),
            empty @ LlmError::EmptyContent => TailorError::UpstreamMalformed(empty.to_string()),
            other => TailorError::UpstreamUnavailable(other.to_string()),
        }
    }
}

impl From<RenderError> for TailorError {
    fn from(err: RenderError) -> Self {
        TailorError::RenderFailure(err.to_string())
    }
}

impl From<ExtractError> for TailorError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Timeout(_) => TailorError::UpstreamUnavailable(err.to_string()),
            other => TailorError::InvalidResume(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_client_errors() {
        assert_eq!(TailorError::InvalidInput("x".into()).status_code(), 400);
        assert_eq!(TailorError::InvalidResume("x".into()).status_code(), 400);
    }

    #[test]
    fn test_upstream_errors_are_server_errors() {
        assert_eq!(TailorError::UpstreamUnavailable("x".into()).status_code(), 500);
        assert_eq!(TailorError::UpstreamMalformed("x".into()).status_code(), 500);
        assert_eq!(TailorError::RenderFailure("x".into()).status_code(), 500);
    }

    #[test]
    fn test_validation_error_maps_to_upstream_malformed() {
        let err: TailorError = ValidationError::MalformedResponse("array").into();
        assert!(matches!(err, TailorError::UpstreamMalformed(_)));
    }

    #[test]
    fn test_llm_timeout_maps_to_upstream_unavailable() {
        let err: TailorError = LlmError::Timeout(120).into();
        assert!(matches!(err, TailorError::UpstreamUnavailable(_)));
    }

    #[test]
    fn test_blank_llm_answer_maps_to_upstream_malformed() {
        let err: TailorError = LlmError::EmptyContent.into();
        assert!(matches!(err, TailorError::UpstreamMalformed(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_render_error_maps_to_render_failure() {
        let err: TailorError = RenderError::Compilation("unknown variable".into()).into();
        assert!(matches!(err, TailorError::RenderFailure(_)));
    }

    #[test]
    fn test_extract_timeout_is_upstream_but_failure_is_invalid_resume() {
        let timeout: TailorError = ExtractError::Timeout(30).into();
        assert!(matches!(timeout, TailorError::UpstreamUnavailable(_)));
        let failed: TailorError = ExtractError::Failed("bad xref".into()).into();
        assert!(matches!(failed, TailorError::InvalidResume(_)));
    }
}
