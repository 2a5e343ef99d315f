//! Wires config, LLM source, handler chain and the Telegram dispatcher.

use std::sync::Arc;

use anyhow::Result;
use handler_chain::HandlerChain;
use llm_client::{mask_token, GenerationSource, LlmConfig, OpenAIGenerationSource};
use notes_core::{init_tracing, Bot};
use stream_edit::StreamingResponseAggregator;
use teloxide::Bot as TeloxideBot;
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::handlers::{LoggingHandler, NotesHandler};
use crate::responses::ResponseTables;
use crate::telegram::{run_dispatcher, TelegramBotAdapter};

/// Canned responses from RESPONSES_FILE, or the built-in tables.
pub fn load_responses(config: &BotConfig) -> Result<ResponseTables> {
    match &config.base.responses_file {
        Some(path) => ResponseTables::from_json_file(path),
        None => Ok(ResponseTables::default()),
    }
}

/// Builds the notes handler from config.
pub fn build_notes_handler(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
    source: Arc<dyn GenerationSource>,
    responses: ResponseTables,
) -> Result<NotesHandler> {
    let llm = config.llm_config();
    Ok(
        NotesHandler::new(bot, source, config.base.variant, Arc::new(responses))?
            .with_aggregator(StreamingResponseAggregator::new(config.base.aggregator))
            .with_system_prompt(llm.system_prompt().map(str::to_string))
            .with_max_output_tokens(llm.max_output_tokens())
            .with_stream_timeout(config.base.stream_timeout()),
    )
}

/// Builds the handler chain (logging → notes).
pub fn build_handler_chain(notes_handler: Arc<NotesHandler>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(notes_handler)
}

fn build_teloxide_bot(config: &BotConfig) -> TeloxideBot {
    let bot = TeloxideBot::new(config.bot_token());
    if let Some(url_str) = config.telegram_api_url() {
        match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        }
    } else {
        bot
    }
}

#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let llm = config.llm_config();
    info!(
        variant = ?config.base.variant,
        provider = ?llm.provider(),
        model = %llm.model(),
        api_key = %mask_token(llm.api_key()),
        batch_interval = config.base.aggregator.batch_interval(),
        stream_timeout_secs = config.base.stream_timeout_secs,
        "Initializing bot"
    );

    let responses = load_responses(&config)?;
    let teloxide_bot = build_teloxide_bot(&config);
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let source: Arc<dyn GenerationSource> = Arc::new(OpenAIGenerationSource::from_config(llm));
    let notes_handler = Arc::new(build_notes_handler(&config, bot, source, responses)?);
    let handler_chain = build_handler_chain(notes_handler);

    info!("Bot started successfully");

    run_dispatcher(teloxide_bot, handler_chain).await
}
