//! CLI interface for the resume tailor

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "resume-tailor")]
#[command(about = "Tailor a resume to a job description and render it as a PDF")]
#[command(long_about = "Extracts the text of a PDF resume, asks the configured LLM to tailor it to a job description, and renders the result with a fixed one-column template")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tailor a resume for one job posting
    Tailor {
        /// Path to the resume PDF
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to a text file holding the job description
        #[arg(short, long)]
        job: PathBuf,

        /// Company name (inferred from the job description if omitted)
        #[arg(long)]
        company: Option<String>,

        /// Job title (inferred from the job description if omitted)
        #[arg(long)]
        title: Option<String>,

        /// Directory the tailored PDF is written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Render a resume JSON document to PDF without calling the LLM
    Render {
        /// Resume document as JSON (code fences are tolerated)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF path
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Validate file extension
pub fn validate_file_extension(path: &std::path::Path, allowed: &[&str]) -> Result<(), String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| format!("{} has no file extension", path.display()))?;
    if allowed.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "{} has unsupported extension '.{ext}' (expected one of: {})",
            path.display(),
            allowed.join(", ")
        ))
    }
}
