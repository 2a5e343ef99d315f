//! [`GenerationSource`] backed by openai-client (OpenAI-compatible endpoints or Azure OpenAI).

use anyhow::Result;
use async_trait::async_trait;
use futures::StreamExt;
use tracing::{info, instrument};

use super::{chat_message_to_openai, DeltaEvent, DeltaStream, GenerationRequest, GenerationSource};
use crate::config::{LlmConfig, LlmProvider};

/// Streams completions through openai-client. Each streamed choice becomes one [`DeltaEvent`].
#[derive(Clone)]
pub struct OpenAIGenerationSource {
    client: openai_client::OpenAIClient,
    model: String,
}

impl OpenAIGenerationSource {
    pub fn new(client: openai_client::OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Builds the client for the configured provider.
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        let client = match config.provider() {
            LlmProvider::OpenAI => openai_client::OpenAIClient::with_base_url(
                config.api_key().to_string(),
                config.base_url().to_string(),
            ),
            LlmProvider::Azure => openai_client::OpenAIClient::azure(
                config.base_url().to_string(),
                config.api_key().to_string(),
                config.model().to_string(),
                config
                    .api_version()
                    .unwrap_or(crate::config::DEFAULT_AZURE_API_VERSION)
                    .to_string(),
            ),
        };
        Self::new(client, config.model())
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerationSource for OpenAIGenerationSource {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn open(&self, request: GenerationRequest) -> Result<DeltaStream> {
        let messages = request
            .messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        info!(
            message_count = messages.len(),
            max_output_tokens = request.max_output_tokens,
            "Opening generation stream"
        );
        let deltas = self
            .client
            .chat_completion_deltas(&self.model, messages, request.max_output_tokens)
            .await?;
        Ok(deltas
            .map(|item| item.map(|content| DeltaEvent { content }))
            .boxed())
    }
}
