use anyhow::Result;
use llm_client::{EnvLlmConfig, LlmConfig};

use super::base::BaseConfig;

/// Full bot configuration: base settings plus the LLM endpoint.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            llm: EnvLlmConfig::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        if self.llm.api_key().trim().is_empty() {
            anyhow::bail!("LLM API key is empty");
        }
        Ok(())
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }

    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }

    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }

    pub fn llm_config(&self) -> &dyn LlmConfig {
        &self.llm
    }
}
