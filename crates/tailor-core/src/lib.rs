//! Resume tailoring core: the document model, its PDF renderer, and the
//! pipeline that turns an uploaded resume plus a job description into a
//! tailored PDF via an LLM.
//!
//! Hosting adapters (HTTP server, CLI) depend on this crate and only translate
//! their request/response shapes into [`TailorRequest`] / [`TailoredResume`].

pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod markup;
pub mod model;
pub mod prompts;
pub mod render;
pub mod tailor;

pub use config::{CoreConfig, LlmConfig, LlmProvider};
pub use error::{RenderError, TailorError, ValidationError};
pub use extract::{ExtractError, PdfTextExtractor, TextExtractor};
pub use llm::{CompletionBackend, CompletionRequest, LlmClient, LlmError};
pub use markup::normalize;
pub use model::{parse_resume_document, parse_resume_json, ResumeDocument};
pub use render::render;
pub use tailor::{safe_filename_component, suggested_filename, Tailor, TailorRequest, TailoredResume};
