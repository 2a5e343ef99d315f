//! Wraps teloxide::Bot and implements [`notes_core::Bot`]. Tests substitute another Bot impl.

use std::borrow::Cow;

use async_trait::async_trait;
use notes_core::{parse_message_id, Bot as CoreBot, BotError, Card, Chat, Message, Result};
use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId},
};

/// Telegram's limit on message text, in UTF-16 code units.
pub const TELEGRAM_MAX_MESSAGE_LEN: usize = 4096;

const TRUNCATION_MARK: char = '…';

/// Cuts `text` to fit one Telegram message, ending with `…` when anything was dropped.
pub fn fit_message_text(text: &str) -> Cow<'_, str> {
    if text.encode_utf16().count() <= TELEGRAM_MAX_MESSAGE_LEN {
        return Cow::Borrowed(text);
    }
    let budget = TELEGRAM_MAX_MESSAGE_LEN - TRUNCATION_MARK.len_utf16();
    let mut used = 0;
    let mut end = 0;
    for (i, c) in text.char_indices() {
        if used + c.len_utf16() > budget {
            break;
        }
        used += c.len_utf16();
        end = i + c.len_utf8();
    }
    let mut fitted = text[..end].to_string();
    fitted.push(TRUNCATION_MARK);
    Cow::Owned(fitted)
}

/// One row of callback buttons; each button's callback data is the action verb.
pub fn card_keyboard(card: &Card) -> InlineKeyboardMarkup {
    let row: Vec<InlineKeyboardButton> = card
        .actions
        .iter()
        .map(|a| InlineKeyboardButton::callback(a.title.clone(), a.verb.clone()))
        .collect();
    InlineKeyboardMarkup::new(vec![row])
}

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), fit_message_text(text).into_owned())
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), fit_message_text(text).into_owned())
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(
                ChatId(chat.id),
                MessageId(id),
                fit_message_text(text).into_owned(),
            )
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_card(&self, chat: &Chat, card: &Card) -> Result<()> {
        let mut request = self
            .bot
            .send_message(ChatId(chat.id), fit_message_text(&card.text()).into_owned());
        if !card.actions.is_empty() {
            request = request.reply_markup(card_keyboard(card));
        }
        request.await.map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }
}
