//! # Generation source abstraction
//!
//! Defines [`GenerationSource`]: open a generation request and get back a lazy, forward-only
//! stream of [`DeltaEvent`]s in generation order. The OpenAI/Azure implementation lives in
//! [`OpenAIGenerationSource`]. Transport-agnostic; consumed by stream-edit and notes-bot.

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig, LlmProvider};
pub use openai_llm::OpenAIGenerationSource;
pub use openai_client::mask_token;

/// Default cap on generated tokens per request.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 128;

/// One incremental unit of generated text. `content` may be absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaEvent {
    pub content: Option<String>,
}

impl DeltaEvent {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    /// A delta that carries no content.
    pub fn empty() -> Self {
        Self { content: None }
    }

    /// The content when present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|s| !s.is_empty())
    }
}

/// Lazy stream of deltas; an `Err` item means the generation failed mid-stream.
pub type DeltaStream = BoxStream<'static, Result<DeltaEvent>>;

/// A generation request: ordered chat messages and an output token cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub messages: Vec<ChatMessage>,
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// Generation backend: opens a request and yields deltas until the model completes.
#[async_trait]
pub trait GenerationSource: Send + Sync {
    /// Opens the stream. Fails up front when the request cannot be sent; later failures are stream items.
    async fn open(&self, request: GenerationRequest) -> Result<DeltaStream>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_text_filters_empty() {
        assert_eq!(DeltaEvent::new("hi").text(), Some("hi"));
        assert_eq!(DeltaEvent::new("").text(), None);
        assert_eq!(DeltaEvent::empty().text(), None);
    }

    #[test]
    fn test_request_defaults_max_output_tokens() {
        let request = GenerationRequest::new(vec![ChatMessage::user("hi")]);
        assert_eq!(request.max_output_tokens, 128);
        assert_eq!(request.with_max_output_tokens(16).max_output_tokens, 16);
    }

    #[test]
    fn test_chat_message_to_openai_roles() {
        let system = chat_message_to_openai(&ChatMessage::system("s")).unwrap();
        assert!(matches!(system, ChatCompletionRequestMessage::System(_)));
        let user = chat_message_to_openai(&ChatMessage::user("u")).unwrap();
        assert!(matches!(user, ChatCompletionRequestMessage::User(_)));
        let assistant = chat_message_to_openai(&ChatMessage::assistant("a")).unwrap();
        assert!(matches!(assistant, ChatCompletionRequestMessage::Assistant(_)));
    }
}
