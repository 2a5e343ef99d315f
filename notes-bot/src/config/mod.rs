//! Bot configuration: BaseConfig (Telegram, log, variant, streaming) + LLM config. Loaded from env.

mod base;
mod bot_config;


pub use base::{BaseConfig, DEFAULT_LOG_FILE, DEFAULT_STREAM_TIMEOUT_SECS};
pub use bot_config::BotConfig;
