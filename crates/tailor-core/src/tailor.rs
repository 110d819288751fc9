//! Job-tailoring pipeline: resume bytes + job description in, tailored PDF out.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::CoreConfig;
use crate::error::TailorError;
use crate::extract::{PdfTextExtractor, TextExtractor};
use crate::llm::{backend_from_config, CompletionRequest, LlmClient};
use crate::model::{parse_resume_json, scalar_text};
use crate::prompts::{
    job_details_prompt, tailor_prompt, JOB_DETAILS_MAX_TOKENS, JSON_ONLY_SYSTEM, TAILOR_MAX_TOKENS,
    UNKNOWN_COMPANY, UNKNOWN_POSITION,
};
use crate::render;

/// One tailoring job as received from an adapter.
#[derive(Debug, Clone)]
pub struct TailorRequest {
    /// Raw bytes of the uploaded resume PDF.
    pub resume: Vec<u8>,
    pub job_description: String,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TailoredResume {
    pub pdf: Vec<u8>,
    pub filename: String,
    pub keywords_added: Vec<String>,
    pub company_name: String,
    pub job_title: String,
}

/// The shared, read-only pipeline. Cheap to clone behind `Arc`.
#[derive(Clone)]
pub struct Tailor {
    llm: LlmClient,
    extractor: Arc<dyn TextExtractor>,
}

impl Tailor {
    pub fn new(llm: LlmClient, extractor: Arc<dyn TextExtractor>) -> Self {
        Self { llm, extractor }
    }

    pub fn from_config(config: &CoreConfig) -> Result<Self, TailorError> {
        let backend = backend_from_config(&config.llm)
            .map_err(|e| TailorError::Configuration(e.to_string()))?;
        Ok(Self::new(
            LlmClient::new(backend),
            Arc::new(PdfTextExtractor::new(config.extract_timeout_secs)),
        ))
    }

    pub fn provider(&self) -> &'static str {
        self.llm.provider()
    }

    /// Runs the whole pipeline for one request.
    ///
    /// Steps:
    /// 1. validate input
    /// 2. extract resume text
    /// 3. infer company / title if either is missing (one LLM call)
    /// 4. tailor the resume (one LLM call) → ResumeDocument
    /// 5. render the PDF on the blocking pool
    pub async fn run(&self, request: TailorRequest) -> Result<TailoredResume, TailorError> {
        let span = info_span!("tailor", request_id = %Uuid::new_v4());
        self.run_inner(request).instrument(span).await
    }

    async fn run_inner(&self, request: TailorRequest) -> Result<TailoredResume, TailorError> {
        // Step 1: Validate input
        if request.resume.is_empty() {
            return Err(TailorError::InvalidInput("Resume file is required".to_string()));
        }
        if request.job_description.trim().is_empty() {
            return Err(TailorError::InvalidInput("Job description is required".to_string()));
        }
        info!(
            resume_bytes = request.resume.len(),
            jd_chars = request.job_description.len(),
            "tailoring request received"
        );

        // Step 2: Extract resume text
        let resume_text = self.extractor.extract(request.resume).await?;
        if resume_text.trim().is_empty() {
            return Err(TailorError::InvalidResume(
                "no text found in the uploaded document".to_string(),
            ));
        }
        info!(chars = resume_text.len(), "resume text extracted");

        // Step 3: Job details
        let (company_name, job_title) = self
            .resolve_job_details(
                &request.job_description,
                present(request.company_name),
                present(request.job_title),
            )
            .await?;
        info!(company = %company_name, title = %job_title, "job details resolved");

        // Step 4: Tailor
        let prompt = tailor_prompt(&resume_text, &request.job_description, &company_name, &job_title);
        let answer = self
            .llm
            .call(CompletionRequest {
                system: None,
                prompt: &prompt,
                max_tokens: TAILOR_MAX_TOKENS,
            })
            .await?;
        let document = parse_resume_json(&answer)?;
        let keywords_added = document.keywords_added.clone();
        info!(
            education = document.education.len(),
            experience = document.experience.len(),
            projects = document.projects.len(),
            keywords = keywords_added.len(),
            "tailored resume parsed"
        );

        // Step 5: Render
        let pdf = tokio::task::spawn_blocking(move || render::render(&document))
            .await
            .map_err(|e| TailorError::RenderFailure(e.to_string()))??;
        let filename = suggested_filename(&company_name, &job_title);
        info!(bytes = pdf.len(), filename = %filename, "resume rendered");

        Ok(TailoredResume {
            pdf,
            filename,
            keywords_added,
            company_name,
            job_title,
        })
    }

    /// Fills whichever of company / title the caller left out. Values the
    /// caller supplied are returned untouched.
    async fn resolve_job_details(
        &self,
        job_description: &str,
        company_name: Option<String>,
        job_title: Option<String>,
    ) -> Result<(String, String), TailorError> {
        if let (Some(company), Some(title)) = (&company_name, &job_title) {
            return Ok((company.clone(), title.clone()));
        }

        let prompt = job_details_prompt(job_description);
        let details: Value = self
            .llm
            .call_json(CompletionRequest {
                system: Some(JSON_ONLY_SYSTEM),
                prompt: &prompt,
                max_tokens: JOB_DETAILS_MAX_TOKENS,
            })
            .await?;
        if !details.is_object() {
            return Err(TailorError::UpstreamMalformed(
                "job details answer is not a JSON object".to_string(),
            ));
        }
        // Same leniency as the resume model: numbers and bools read as text.
        let detail = |key: &str| present(details.get(key).and_then(scalar_text));

        let company = company_name.unwrap_or_else(|| {
            detail("company_name").unwrap_or_else(|| {
                warn!("company name not found in job description");
                UNKNOWN_COMPANY.to_string()
            })
        });
        let title = job_title.unwrap_or_else(|| {
            detail("job_title").unwrap_or_else(|| {
                warn!("job title not found in job description");
                UNKNOWN_POSITION.to_string()
            })
        });
        Ok((company, title))
    }
}

/// `None` for absent or whitespace-only values; otherwise the trimmed value.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reduces `raw` to a filename-safe token: letters, digits, `_`, `-` and
/// whitespace are kept, then whitespace runs become single underscores.
pub fn safe_filename_component(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

pub fn suggested_filename(company_name: &str, job_title: &str) -> String {
    format!(
        "Resume_{}_{}.pdf",
        safe_filename_component(company_name),
        safe_filename_component(job_title)
    )
}
