use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tailor_core::TailorRequest;
use tracing::info;

use crate::errors::AppError;
use crate::routes::KEYWORDS_HEADER;
use crate::state::AppState;

/// Form fields of one generate request, collected from the multipart body.
#[derive(Debug, Default)]
struct GenerateForm {
    resume: Option<Bytes>,
    job_description: String,
    company_name: Option<String>,
    job_title: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<GenerateForm, AppError> {
    let mut form = GenerateForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid resume upload: {e}")))?;
                form.resume = Some(data);
            }
            "job_description" | "company_name" | "job_title" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid field '{name}': {e}")))?;
                match name.as_str() {
                    "job_description" => form.job_description = text,
                    "company_name" => form.company_name = Some(text),
                    _ => form.job_title = Some(text),
                }
            }
            _ => {} // unknown fields are ignored
        }
    }
    Ok(form)
}

/// Header values must be visible ASCII; anything else is dropped.
fn header_value(raw: &str) -> HeaderValue {
    let visible: String = raw
        .chars()
        .filter(|c| c.is_ascii() && (!c.is_ascii_control() || *c == '\t'))
        .collect();
    HeaderValue::from_str(&visible).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// POST /api/generate
/// Multipart: `resume` (PDF file), `job_description`, optional `company_name`
/// and `job_title`. Responds with the tailored PDF as an attachment.
pub async fn generate_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_form(multipart).await?;
    info!(
        resume_bytes = form.resume.as_ref().map_or(0, Bytes::len),
        has_company = form.company_name.is_some(),
        has_title = form.job_title.is_some(),
        "Generate request received"
    );

    let tailored = state
        .tailor
        .run(TailorRequest {
            resume: form.resume.map(|b| b.to_vec()).unwrap_or_default(),
            job_description: form.job_description,
            company_name: form.company_name,
            job_title: form.job_title,
        })
        .await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        header_value(&format!("attachment; filename=\"{}\"", tailored.filename)),
    );
    headers.insert(
        HeaderName::from_static(KEYWORDS_HEADER),
        header_value(&tailored.keywords_added.join(",")),
    );

    Ok((StatusCode::OK, headers, tailored.pdf).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use serde_json::Value;
    use tailor_core::{
        CompletionBackend, CompletionRequest, CoreConfig, ExtractError, LlmClient, LlmConfig,
        LlmError, LlmProvider, Tailor, TextExtractor,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::routes::build_router;

    const BOUNDARY: &str = "tailorboundary";

    const RESUME_JSON: &str = r#"```json
{"name": "Grace Hopper", "experience": [{"company": "Navy", "bullets": ["Built **COBOL**"]}],
 "keywords_added": ["COBOL", "compilers"]}
```"#;

    struct Scripted(Mutex<Vec<String>>);

    #[async_trait]
    impl CompletionBackend for Scripted {
        async fn complete(&self, _request: CompletionRequest<'_>) -> Result<String, LlmError> {
            Ok(self.0.lock().unwrap().remove(0))
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    struct EchoText;

    #[async_trait]
    impl TextExtractor for EchoText {
        async fn extract(&self, bytes: Vec<u8>) -> Result<String, ExtractError> {
            String::from_utf8(bytes).map_err(|e| ExtractError::Failed(e.to_string()))
        }
    }

    fn app(answers: &[&str]) -> axum::Router {
        let backend = Scripted(Mutex::new(answers.iter().map(|a| a.to_string()).collect()));
        let tailor = Tailor::new(LlmClient::new(Arc::new(backend)), Arc::new(EchoText));
        let config = Config {
            core: CoreConfig {
                llm: LlmConfig {
                    provider: LlmProvider::Anthropic,
                    api_key: "test".to_string(),
                    model: "test-model".to_string(),
                    base_url: None,
                    timeout_secs: 5,
                },
                extract_timeout_secs: 5,
            },
            port: 0,
            max_upload_bytes: 1024 * 1024,
            rust_log: "info".to_string(),
        };
        build_router(AppState {
            tailor: Arc::new(tailor),
            config,
        })
    }

    /// Hand-built multipart body: `(name, filename, content)`.
    fn multipart(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(f) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: application/pdf\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_pdf_attachment() {
        let resp = app(&[RESUME_JSON])
            .oneshot(multipart(&[
                ("resume", Some("cv.pdf"), "Grace Hopper, programmer"),
                ("job_description", None, "Compiler engineer wanted"),
                ("company_name", None, "Acme, Inc."),
                ("job_title", None, "Compiler Engineer"),
            ]))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let headers = resp.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Resume_Acme_Inc_Compiler_Engineer.pdf\""
        );
        assert_eq!(headers[KEYWORDS_HEADER], "COBOL,compilers");

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_missing_details_are_inferred() {
        let details = r#"{"company_name": "Ferrous", "job_title": "Engineer"}"#;
        let resp = app(&[details, RESUME_JSON])
            .oneshot(multipart(&[
                ("resume", Some("cv.pdf"), "Grace Hopper"),
                ("job_description", None, "Ferrous is hiring an Engineer"),
            ]))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Resume_Ferrous_Engineer.pdf\""
        );
    }

    #[tokio::test]
    async fn test_missing_job_description_is_400_with_error_body() {
        let resp = app(&[])
            .oneshot(multipart(&[("resume", Some("cv.pdf"), "Grace Hopper")]))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json_body(resp).await;
        assert_eq!(body["error"], "Job description is required");
    }

    #[tokio::test]
    async fn test_missing_resume_is_400() {
        let resp = app(&[])
            .oneshot(multipart(&[("job_description", None, "Anything")]))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_model_answer_is_500_without_pdf() {
        let resp = app(&["I cannot help with that."])
            .oneshot(multipart(&[
                ("resume", Some("cv.pdf"), "Grace Hopper"),
                ("job_description", None, "Compiler engineer"),
                ("company_name", None, "Acme"),
                ("job_title", None, "Engineer"),
            ]))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_ne!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
        let body = json_body(resp).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to parse AI response"));
    }

    #[tokio::test]
    async fn test_health() {
        let resp = app(&[])
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "tailor-api");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_header_value_drops_non_ascii() {
        assert_eq!(header_value("Caf\u{e9},Rust"), "Caf,Rust");
    }
}
