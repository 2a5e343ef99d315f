//! # notes-core
//!
//! Core types and traits for the notes bot: [`Bot`], [`Handler`], [`Card`], message and user types,
//! and tracing initialization. Transport-agnostic; used by handler-chain and notes-bot.

pub mod bot;
pub mod card;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use card::{Card, CardAction};
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User,
    MESSAGE_TYPE_CALLBACK, MESSAGE_TYPE_TEXT,
};
