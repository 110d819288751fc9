use anyhow::{bail, Context, Result};

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-5-20250929";
pub const DEFAULT_OPENROUTER_MODEL: &str = "xiaomi/mimo-v2-flash:free";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
const DEFAULT_EXTRACT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Anthropic,
    OpenRouter,
}

impl LlmProvider {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(LlmProvider::Anthropic),
            "openrouter" | "openai" => Ok(LlmProvider::OpenRouter),
            other => bail!("LLM_PROVIDER must be 'anthropic' or 'openrouter', got '{other}'"),
        }
    }

    fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
            LlmProvider::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            LlmProvider::Anthropic => DEFAULT_ANTHROPIC_MODEL,
            LlmProvider::OpenRouter => DEFAULT_OPENROUTER_MODEL,
        }
    }
}

/// Connection settings for the LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    /// Overrides the provider's default endpoint (proxies, local gateways).
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

/// Settings shared by every adapter that runs the tailoring pipeline.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub llm: LlmConfig,
    pub extract_timeout_secs: u64,
}

impl CoreConfig {
    /// Reads the process environment, loading `.env` first if present.
    /// Fails if the selected provider's API key is missing.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let provider = match lookup("LLM_PROVIDER") {
            Some(raw) if !raw.trim().is_empty() => LlmProvider::parse(&raw)?,
            _ => LlmProvider::Anthropic,
        };

        let key_var = provider.api_key_var();
        let api_key = lookup(key_var)
            .filter(|k| !k.trim().is_empty())
            .with_context(|| format!("Required environment variable '{key_var}' is not set"))?;

        let model = lookup("LLM_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        Ok(CoreConfig {
            llm: LlmConfig {
                provider,
                api_key,
                model,
                base_url: lookup("LLM_BASE_URL").filter(|u| !u.trim().is_empty()),
                timeout_secs: parse_secs(&lookup, "LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?,
            },
            extract_timeout_secs: parse_secs(
                &lookup,
                "EXTRACT_TIMEOUT_SECS",
                DEFAULT_EXTRACT_TIMEOUT_SECS,
            )?,
        })
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64> {
    match lookup(key) {
        Some(raw) => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{key} must be a whole number of seconds"))?;
            if secs == 0 {
                bail!("{key} must be greater than zero");
            }
            Ok(secs)
        }
        None => Ok(default),
    }
}
