use notes_core::{
    Chat, Message, ToCoreMessage, ToCoreUser, User, MESSAGE_TYPE_CALLBACK,
    MESSAGE_TYPE_TEXT,
};

fn unknown_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}

/// Telegram user to core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Telegram text message to core message.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(unknown_user),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            content: self.0.text().unwrap_or("").to_string(),
            message_type: MESSAGE_TYPE_TEXT.to_string(),
            created_at: chrono::Utc::now(),
        }
    }
}

/// Inline button press to core message. `content` is the button's callback data (the card verb);
/// chat and id come from the card message the button belongs to.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> TelegramCallbackWrapper<'a> {
    /// `None` when the card message is no longer known to Telegram, so there is no chat to answer in.
    pub fn chat(&self) -> Option<Chat> {
        self.0.message.as_ref().map(|m| {
            let chat = m.chat();
            Chat {
                id: chat.id.0,
                chat_type: format!("{:?}", chat.kind),
            }
        })
    }
}

impl<'a> ToCoreMessage for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Message {
        let chat = self.chat().unwrap_or_else(|| Chat {
            id: self.0.from.id.0 as i64,
            chat_type: "Private".to_string(),
        });
        Message {
            id: self
                .0
                .message
                .as_ref()
                .map(|m| m.id().to_string())
                .unwrap_or_default(),
            user: TelegramUserWrapper(&self.0.from).to_core(),
            chat,
            content: self.0.data.clone().unwrap_or_default(),
            message_type: MESSAGE_TYPE_CALLBACK.to_string(),
            created_at: chrono::Utc::now(),
        }
    }
}
