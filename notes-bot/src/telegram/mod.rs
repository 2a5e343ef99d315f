//! Telegram layer: adapters, Bot implementation, dispatcher runner.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{card_keyboard, fit_message_text, TelegramBotAdapter, TELEGRAM_MAX_MESSAGE_LEN};
pub use runner::run_dispatcher;
