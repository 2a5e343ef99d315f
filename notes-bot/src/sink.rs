//! [`MessageSink`] over a core [`Bot`] and one chat.

use std::sync::Arc;

use async_trait::async_trait;
use notes_core::{Bot, Chat};
use stream_edit::{MessageId, MessageSink};
use tracing::debug;

/// True when Telegram returns "message is not modified" (content unchanged); treat as success.
pub fn is_message_not_modified_error(error: &str) -> bool {
    error.contains("message is not modified") || error.contains("exactly the same")
}

/// Sends the first reply to `chat` and edits it in place afterwards.
#[derive(Clone)]
pub struct ChatSink {
    bot: Arc<dyn Bot>,
    chat: Chat,
}

impl ChatSink {
    pub fn new(bot: Arc<dyn Bot>, chat: Chat) -> Self {
        Self { bot, chat }
    }
}

#[async_trait]
impl MessageSink for ChatSink {
    async fn create(&self, text: &str) -> anyhow::Result<MessageId> {
        let id = self.bot.send_message_and_return_id(&self.chat, text).await?;
        Ok(id)
    }

    async fn update(&self, message_id: &MessageId, text: &str) -> anyhow::Result<()> {
        match self.bot.edit_message(&self.chat, message_id, text).await {
            Ok(()) => Ok(()),
            Err(e) if is_message_not_modified_error(&e.to_string()) => {
                debug!(chat_id = self.chat.id, message_id = %message_id, "Edit skipped: message not modified");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_message_not_modified_error() {
        assert!(is_message_not_modified_error(
            "Bad Request: message is not modified: specified new message content and reply markup are exactly the same"
        ));
        assert!(is_message_not_modified_error("exactly the same"));
        assert!(!is_message_not_modified_error("Bad Request: message to edit not found"));
    }
}
