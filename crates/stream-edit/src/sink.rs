//! Outgoing message capability.

use async_trait::async_trait;

/// Transport-specific identifier of a created message.
pub type MessageId = String;

/// Posts one message to a conversation and edits it afterwards.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Posts a new message and returns its id.
    async fn create(&self, text: &str) -> anyhow::Result<MessageId>;

    /// Replaces the content of a message created by [`MessageSink::create`].
    async fn update(&self, id: &MessageId, text: &str) -> anyhow::Result<()>;
}
