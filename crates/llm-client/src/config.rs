//! LLM configuration: trait and env-based implementation.

use anyhow::{bail, Context, Result};
use std::env;

use crate::DEFAULT_MAX_OUTPUT_TOKENS;

/// Default Azure deployment id.
pub const DEFAULT_AZURE_DEPLOYMENT: &str = "TestingTeamsBots";
/// Default Azure OpenAI REST API version.
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-01";

/// Endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAI,
    Azure,
}

impl LlmProvider {
    /// Parses `openai` or `azure` (case-insensitive).
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAI),
            "azure" => Ok(LlmProvider::Azure),
            other => bail!("LLM_PROVIDER must be 'openai' or 'azure', got '{}'", other),
        }
    }
}

/// LLM configuration interface.
pub trait LlmConfig: Send + Sync {
    fn provider(&self) -> LlmProvider;
    fn api_key(&self) -> &str;
    /// OpenAI base URL, or the Azure resource endpoint.
    fn base_url(&self) -> &str;
    /// Model name, or the Azure deployment id.
    fn model(&self) -> &str;
    /// Azure REST API version; `None` for OpenAI.
    fn api_version(&self) -> Option<&str>;
    fn max_output_tokens(&self) -> u32;
    fn system_prompt(&self) -> Option<&str>;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub provider: LlmProvider,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub api_version: Option<String>,
    pub max_output_tokens: u32,
    pub system_prompt: Option<String>,
}

impl LlmConfig for EnvLlmConfig {
    fn provider(&self) -> LlmProvider {
        self.provider
    }
    fn api_key(&self) -> &str {
        &self.api_key
    }
    fn base_url(&self) -> &str {
        &self.base_url
    }
    fn model(&self) -> &str {
        &self.model
    }
    fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }
    fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }
    fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }
}

impl EnvLlmConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let provider = match env::var("LLM_PROVIDER") {
            Ok(s) => LlmProvider::parse(&s)?,
            Err(_) => LlmProvider::OpenAI,
        };

        let (api_key, base_url, model, api_version) = match provider {
            LlmProvider::OpenAI => {
                let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
                let base_url = env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
                let model = env::var("MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
                (api_key, base_url, model, None)
            }
            LlmProvider::Azure => {
                let base_url = env::var("AZURE_OPENAI_ENDPOINT")
                    .context("AZURE_OPENAI_ENDPOINT not set")?;
                let api_key =
                    env::var("AZURE_OPENAI_KEY").context("AZURE_OPENAI_KEY not set")?;
                let model = env::var("AZURE_OPENAI_DEPLOYMENT")
                    .unwrap_or_else(|_| DEFAULT_AZURE_DEPLOYMENT.to_string());
                let api_version = env::var("AZURE_OPENAI_API_VERSION")
                    .unwrap_or_else(|_| DEFAULT_AZURE_API_VERSION.to_string());
                (api_key, base_url, model, Some(api_version))
            }
        };

        let max_output_tokens = match env::var("LLM_MAX_OUTPUT_TOKENS") {
            Ok(s) => s
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| {
                    format!("LLM_MAX_OUTPUT_TOKENS must be a positive integer, got '{}'", s)
                })?,
            Err(_) => DEFAULT_MAX_OUTPUT_TOKENS,
        };
        let system_prompt = env::var("LLM_SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(Self {
            provider,
            api_key,
            base_url,
            model,
            api_version,
            max_output_tokens,
            system_prompt,
        })
    }
}
