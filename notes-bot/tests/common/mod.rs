#![allow(dead_code)]

pub mod mock_bot;
pub mod scripted_source;

use chrono::Utc;
use notes_core::{Chat, Message, User, MESSAGE_TYPE_CALLBACK, MESSAGE_TYPE_TEXT};

pub const CHAT_ID: i64 = 42;

fn message(content: &str, message_type: &str) -> Message {
    Message {
        id: "10".to_string(),
        user: User {
            id: 7,
            username: Some("oncall".to_string()),
            first_name: Some("On".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: CHAT_ID,
            chat_type: "Private".to_string(),
        },
        content: content.to_string(),
        message_type: message_type.to_string(),
        created_at: Utc::now(),
    }
}

/// Typed text message.
pub fn text(content: &str) -> Message {
    message(content, MESSAGE_TYPE_TEXT)
}

/// Inline button press carrying `verb`.
pub fn callback(verb: &str) -> Message {
    message(verb, MESSAGE_TYPE_CALLBACK)
}
