//! # Prompt
//!
//! Chat message types and the prompt templates the bot sends to the model.
//!
//! ## Styles
//!
//! - **Raw**: the user's text is sent unchanged as a single user message.
//! - **Summarize**: the text is wrapped as `Summarize: {notes}`.
//!
//! An optional system instruction is prepended when configured.

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl MessageRole {
    /// API role string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Prefix used by [`PromptStyle::Summarize`].
pub const SUMMARIZE_PREFIX: &str = "Summarize:";

/// How user-submitted notes are turned into the user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Send the query unchanged.
    Raw,
    /// Send `Summarize: {query}`.
    Summarize,
}

impl PromptStyle {
    /// Renders the user message content for `query`.
    pub fn render(&self, query: &str) -> String {
        match self {
            PromptStyle::Raw => query.to_string(),
            PromptStyle::Summarize => format!("{} {}", SUMMARIZE_PREFIX, query.trim()),
        }
    }
}

/// Builds the message list for one generation: optional system instruction, then one user message.
///
/// A system prompt that is empty after trimming is skipped.
pub fn build_messages(
    style: PromptStyle,
    system_prompt: Option<&str>,
    query: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system_prompt.map(str::trim).filter(|s| !s.is_empty()) {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(style.render(query)));
    messages
}
