//! Mock implementation of [`notes_core::Bot`] for integration tests.
//!
//! Records every call in order so tests can assert on what the chat would have seen without
//! hitting Telegram.

use std::sync::Mutex;

use async_trait::async_trait;
use notes_core::{Bot, BotError, Card, Chat, Message, Result};

/// Error Telegram returns for a message whose text is empty or only whitespace.
pub const EMPTY_TEXT_ERROR: &str = "Bad Request: message text is empty";

/// Id returned by `send_message_and_return_id`.
pub const PLACEHOLDER_ID: &str = "1";

/// One recorded Bot call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCall {
    Send(String),
    Reply(String),
    SendWithId(String),
    Edit { message_id: String, text: String },
    Card(Card),
}

#[derive(Default)]
pub struct MockBot {
    calls: Mutex<Vec<BotCall>>,
    /// Every edit fails with this error text (after being recorded).
    edit_error: Option<String>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_edits(error: &str) -> Self {
        Self {
            edit_error: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Edit { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_edit(&self) -> Option<String> {
        self.edits().pop()
    }

    /// Texts sent via `send_message` or `reply_to`.
    pub fn texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Send(t) | BotCall::Reply(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn cards(&self) -> Vec<Card> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Card(card) => Some(card),
                _ => None,
            })
            .collect()
    }

    pub fn created(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::SendWithId(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BotCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Rejects whitespace-only text like Telegram does; the call is still recorded.
    fn check_text(text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(BotError::Bot(EMPTY_TEXT_ERROR.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.record(BotCall::Send(text.to_string()));
        Self::check_text(text)
    }

    async fn reply_to(&self, _message: &Message, text: &str) -> Result<()> {
        self.record(BotCall::Reply(text.to_string()));
        Self::check_text(text)
    }

    async fn send_message_and_return_id(&self, _chat: &Chat, text: &str) -> Result<String> {
        self.record(BotCall::SendWithId(text.to_string()));
        Self::check_text(text)?;
        Ok(PLACEHOLDER_ID.to_string())
    }

    async fn edit_message(&self, _chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record(BotCall::Edit {
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        match &self.edit_error {
            Some(e) => Err(BotError::Bot(e.clone())),
            None => Self::check_text(text),
        }
    }

    async fn send_card(&self, _chat: &Chat, card: &Card) -> Result<()> {
        self.record(BotCall::Card(card.clone()));
        Ok(())
    }
}
