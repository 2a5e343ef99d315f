//! Base config: Telegram connection, logging, bot variant and streaming behaviour.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use stream_edit::AggregatorConfig;

use crate::variant::BotVariant;

pub const DEFAULT_LOG_FILE: &str = "logs/notes-bot.log";
pub const DEFAULT_STREAM_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// BOT_VARIANT
    pub variant: BotVariant,
    /// STREAM_BATCH_INTERVAL: deltas between periodic edits
    pub aggregator: AggregatorConfig,
    /// STREAM_TIMEOUT_SECS; 0 disables
    pub stream_timeout_secs: u64,
    /// RESPONSES_FILE: JSON override for the canned responses
    pub responses_file: Option<PathBuf>,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let variant = match env::var("BOT_VARIANT") {
            Ok(s) => BotVariant::parse(&s)?,
            Err(_) => BotVariant::LiveShare,
        };
        let aggregator = match env::var("STREAM_BATCH_INTERVAL") {
            Ok(s) => {
                let n: usize = s.trim().parse().with_context(|| {
                    format!("STREAM_BATCH_INTERVAL must be a positive integer, got '{}'", s)
                })?;
                AggregatorConfig::try_from(n).context("STREAM_BATCH_INTERVAL")?
            }
            Err(_) => AggregatorConfig::default(),
        };
        let stream_timeout_secs = match env::var("STREAM_TIMEOUT_SECS") {
            Ok(s) => s.trim().parse().with_context(|| {
                format!("STREAM_TIMEOUT_SECS must be a non-negative integer, got '{}'", s)
            })?,
            Err(_) => DEFAULT_STREAM_TIMEOUT_SECS,
        };
        let responses_file = env::var("RESPONSES_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            variant,
            aggregator,
            stream_timeout_secs,
            responses_file,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    pub fn stream_timeout(&self) -> Option<Duration> {
        (self.stream_timeout_secs > 0).then(|| Duration::from_secs(self.stream_timeout_secs))
    }
}
