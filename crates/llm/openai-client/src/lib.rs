//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for streamed chat completion against OpenAI-compatible
//! endpoints or Azure OpenAI deployments. Each streamed choice becomes one content delta.
//! Provides token masking for safe logging.

use async_openai::config::{AzureConfig, OpenAIConfig};
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionResponseStream, CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use std::sync::Arc;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Stream of per-choice content deltas. `Ok(None)` is a delta without content (e.g. role-only or finish chunk).
pub type ContentDeltaStream = BoxStream<'static, anyhow::Result<Option<String>>>;

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}

/// Which endpoint family the client talks to.
enum Backend {
    OpenAI(Client<OpenAIConfig>),
    /// Azure routes by deployment id; the request `model` is informational only.
    Azure(Client<AzureConfig>),
}

impl Backend {
    async fn create_stream(
        &self,
        request: CreateChatCompletionRequest,
    ) -> Result<ChatCompletionResponseStream, OpenAIError> {
        match self {
            Backend::OpenAI(client) => client.chat().create_stream(request).await,
            Backend::Azure(client) => client.chat().create_stream(request).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Backend::OpenAI(_) => "openai",
            Backend::Azure(_) => "azure",
        }
    }
}

/// OpenAI chat client. Wraps an async-openai client; holds the API key for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    backend: Arc<Backend>,
    api_key_for_logging: Option<String>,
}

impl OpenAIClient {
    /// Builds a client using the given API key and default API base URL.
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.clone());
        Self {
            backend: Arc::new(Backend::OpenAI(Client::with_config(config))),
            api_key_for_logging: Some(api_key),
        }
    }

    /// Builds a client with a custom base URL (e.g. for proxies or compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self {
            backend: Arc::new(Backend::OpenAI(Client::with_config(config))),
            api_key_for_logging: Some(api_key),
        }
    }

    /// Builds a client for an Azure OpenAI resource and deployment.
    pub fn azure(
        endpoint: String,
        api_key: String,
        deployment_id: String,
        api_version: String,
    ) -> Self {
        let config = AzureConfig::new()
            .with_api_base(endpoint)
            .with_api_key(api_key.clone())
            .with_deployment_id(deployment_id)
            .with_api_version(api_version);
        Self {
            backend: Arc::new(Backend::Azure(Client::with_config(config))),
            api_key_for_logging: Some(api_key),
        }
    }

    fn masked_key(&self) -> String {
        self.api_key_for_logging
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(|| "***".to_string())
    }

    /// Opens a streamed chat completion and returns one item per streamed choice, in arrival order.
    ///
    /// Transport errors mid-stream are yielded as `Err` items; the caller decides whether to stop.
    #[allow(deprecated)]
    pub async fn chat_completion_deltas(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        max_tokens: u32,
    ) -> anyhow::Result<ContentDeltaStream> {
        tracing::info!(
            backend = self.backend.name(),
            model = %model,
            message_count = messages.len(),
            max_tokens = max_tokens,
            api_key = %self.masked_key(),
            "OpenAI chat_completion_deltas request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .max_tokens(max_tokens)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion_deltas request JSON");
        }

        let stream = self.backend.create_stream(request).await?;

        let deltas = stream.flat_map(|result| {
            let items: Vec<anyhow::Result<Option<String>>> = match result {
                Ok(chunk) => {
                    if let Some(ref u) = chunk.usage {
                        tracing::info!(
                            prompt_tokens = u.prompt_tokens,
                            completion_tokens = u.completion_tokens,
                            total_tokens = u.total_tokens,
                            "OpenAI chat_completion_deltas usage"
                        );
                    }
                    chunk
                        .choices
                        .into_iter()
                        .map(|choice| Ok(choice.delta.content))
                        .collect()
                }
                Err(e) => vec![Err(anyhow::anyhow!("Stream error: {}", e))],
            };
            stream::iter(items)
        });

        Ok(deltas.boxed())
    }
}
