use async_openai::types::{ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs};
use futures::StreamExt;
use openai_client::OpenAIClient;

/// Streams one completion and prints every delta on its own line.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;
    let model = std::env::var("MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

    let client = match std::env::var("OPENAI_BASE_URL") {
        Ok(base_url) => OpenAIClient::with_base_url(api_key, base_url),
        Err(_) => OpenAIClient::new(api_key),
    };

    let messages: Vec<ChatCompletionRequestMessage> = vec![ChatCompletionRequestUserMessageArgs::default()
        .content("Summarize: 7 PM escalated login issue; 9 PM system updates.")
        .build()
        .map(Into::into)?];

    let mut deltas = client.chat_completion_deltas(&model, messages, 128).await?;
    while let Some(delta) = deltas.next().await {
        println!("{:?}", delta?);
    }

    Ok(())
}
