//! Resume tailor: command-line front end for the tailoring pipeline

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use tailor_core::{parse_resume_json, render, CoreConfig, Tailor, TailorRequest};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={log_level},tailor_core={log_level}",
                env!("CARGO_CRATE_NAME")
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run_command(cli.command).await {
        error!("Command failed: {e:#}");
        process::exit(1);
    }
}

async fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Tailor {
            resume,
            job,
            company,
            title,
            out_dir,
        } => {
            let config = CoreConfig::from_env()?;
            let tailor = Tailor::from_config(&config)?;
            let written = tailor_files(&tailor, &resume, &job, company, title, &out_dir).await?;
            println!("Tailored resume written to {}", written.path.display());
            if written.keywords_added.is_empty() {
                println!("Keywords added: (none)");
            } else {
                println!("Keywords added: {}", written.keywords_added.join(", "));
            }
        }
        Commands::Render { input, output } => {
            let bytes = render_file(&input, &output)?;
            println!("Rendered {} ({bytes} bytes)", output.display());
        }
    }
    Ok(())
}

#[derive(Debug)]
struct Written {
    path: PathBuf,
    keywords_added: Vec<String>,
}

async fn tailor_files(
    tailor: &Tailor,
    resume: &Path,
    job: &Path,
    company: Option<String>,
    title: Option<String>,
    out_dir: &Path,
) -> Result<Written> {
    cli::validate_file_extension(resume, &["pdf"])
        .map_err(|e| anyhow::anyhow!("Resume file: {e}"))?;
    if !out_dir.is_dir() {
        bail!("Output directory {} does not exist", out_dir.display());
    }

    let resume_bytes = tokio::fs::read(resume)
        .await
        .with_context(|| format!("Failed to read resume {}", resume.display()))?;
    let job_description = tokio::fs::read_to_string(job)
        .await
        .with_context(|| format!("Failed to read job description {}", job.display()))?;

    info!("Tailoring {} for {}", resume.display(), job.display());
    let tailored = tailor
        .run(TailorRequest {
            resume: resume_bytes,
            job_description,
            company_name: company,
            job_title: title,
        })
        .await?;

    let path = out_dir.join(&tailored.filename);
    tokio::fs::write(&path, &tailored.pdf)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(Written {
        path,
        keywords_added: tailored.keywords_added,
    })
}

/// Renders a resume JSON file straight to PDF. Returns the number of bytes written.
fn render_file(input: &Path, output: &Path) -> Result<usize> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let document = parse_resume_json(&text)
        .with_context(|| format!("{} is not a resume document", input.display()))?;
    let pdf = render(&document)
        .with_context(|| format!("Failed to render {}", input.display()))?;
    std::fs::write(output, &pdf).with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Rendered {} ({} experience entries) to {}",
        document.name,
        document.experience.len(),
        output.display()
    );
    Ok(pdf.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tailor_core::{
        CompletionBackend, CompletionRequest, ExtractError, LlmClient, LlmError, TextExtractor,
    };

    struct Fixed(&'static str);

    #[async_trait]
    impl CompletionBackend for Fixed {
        async fn complete(&self, _request: CompletionRequest<'_>) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    struct Utf8;

    #[async_trait]
    impl TextExtractor for Utf8 {
        async fn extract(&self, bytes: Vec<u8>) -> Result<String, ExtractError> {
            String::from_utf8(bytes).map_err(|e| ExtractError::Failed(e.to_string()))
        }
    }

    #[test]
    fn test_render_file_accepts_fenced_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("resume.json");
        let output = dir.path().join("resume.pdf");
        std::fs::write(&input, "```json\n{\"name\": \"Ada Lovelace\"}\n```").unwrap();

        let bytes = render_file(&input, &output).unwrap();
        let written = std::fs::read(&output).unwrap();
        assert_eq!(written.len(), bytes);
        assert!(written.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_file_rejects_prose() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("resume.json");
        std::fs::write(&input, "not a resume").unwrap();
        assert!(render_file(&input, &dir.path().join("out.pdf")).is_err());
    }

    #[tokio::test]
    async fn test_tailor_files_writes_suggested_filename() {
        let dir = tempfile::tempdir().unwrap();
        let resume = dir.path().join("cv.pdf");
        let job = dir.path().join("jd.txt");
        std::fs::write(&resume, "Ada Lovelace, analyst").unwrap();
        std::fs::write(&job, "Analytical Engine programmer").unwrap();

        let tailor = Tailor::new(
            LlmClient::new(Arc::new(Fixed(r#"{"name": "Ada Lovelace", "keywords_added": ["engines"]}"#))),
            Arc::new(Utf8),
        );
        let written = tailor_files(
            &tailor,
            &resume,
            &job,
            Some("Babbage & Co".to_string()),
            Some("Programmer".to_string()),
            dir.path(),
        )
        .await
        .unwrap();

        assert_eq!(written.path, dir.path().join("Resume_Babbage_Co_Programmer.pdf"));
        assert_eq!(written.keywords_added, vec!["engines"]);
        assert!(std::fs::read(&written.path).unwrap().starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_tailor_files_rejects_non_pdf_resume() {
        let dir = tempfile::tempdir().unwrap();
        let tailor = Tailor::new(LlmClient::new(Arc::new(Fixed("{}"))), Arc::new(Utf8));
        let err = tailor_files(
            &tailor,
            &dir.path().join("cv.docx"),
            &dir.path().join("jd.txt"),
            None,
            None,
            dir.path(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Resume file"));
    }
}
