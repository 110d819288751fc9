use anyhow::{Context, Result};
use tailor_core::CoreConfig;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration loaded from environment variables.
/// Fails at startup if the LLM provider's API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub core: CoreConfig,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let core = CoreConfig::from_env()?; // also loads .env

        Ok(Config {
            core,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => raw
                    .trim()
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a number of bytes")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
