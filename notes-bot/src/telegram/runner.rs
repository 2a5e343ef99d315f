//! Dispatcher runner: converts text messages and inline button presses to core::Message and
//! passes them to HandlerChain (spawned per update).

use anyhow::Result;
use handler_chain::HandlerChain;
use notes_core::{Message as CoreMessage, ToCoreMessage};
use teloxide::prelude::*;
use tracing::{error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

fn spawn_chain(chain: HandlerChain, core_msg: CoreMessage) {
    tokio::spawn(async move {
        info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            message_id = %core_msg.id,
            message_type = %core_msg.message_type,
            "step: processing message (handler chain started)"
        );
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
        }
    });
}

async fn on_message(msg: Message, chain: HandlerChain) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    if msg.text().is_none() {
        info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            "Received non-text message"
        );
        return Ok(());
    }
    spawn_chain(chain, core_msg);
    Ok(())
}

async fn on_callback(bot: Bot, q: CallbackQuery, chain: HandlerChain) -> ResponseResult<()> {
    // Clears the loading state on the pressed button.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }
    let wrapper = TelegramCallbackWrapper(&q);
    if wrapper.chat().is_none() {
        warn!(user_id = q.from.id.0, "Callback without card message; ignored");
        return Ok(());
    }
    spawn_chain(chain, wrapper.to_core());
    Ok(())
}

/// Starts the dispatcher: text messages and callback queries both go to `handler_chain`.
/// Returns when the dispatcher stops (Ctrl-C).
#[instrument(skip(bot, handler_chain))]
pub async fn run_dispatcher(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity resolved");
        }
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
