//! Generation source adapter that hides leading whitespace from the chat.
//!
//! Models often open a stream with `"\n\n"`. Telegram refuses to send a message whose text is
//! only whitespace, so such deltas are turned into empty ones until the first visible text.

use std::sync::Arc;

use async_trait::async_trait;
use futures::{future, StreamExt};
use llm_client::{DeltaEvent, DeltaStream, GenerationRequest, GenerationSource};

/// Replaces whitespace-only deltas with [`DeltaEvent::empty`] until a delta has visible text;
/// later deltas pass through unchanged. Errors pass through as-is.
pub fn skip_leading_whitespace(deltas: DeltaStream) -> DeltaStream {
    deltas
        .scan(false, |seen_text, item| {
            let item = item.map(|delta| {
                if *seen_text {
                    return delta;
                }
                match delta.text() {
                    Some(text) if text.trim().is_empty() => DeltaEvent::empty(),
                    Some(_) => {
                        *seen_text = true;
                        delta
                    }
                    None => delta,
                }
            });
            future::ready(Some(item))
        })
        .boxed()
}

/// Wraps a [`GenerationSource`] so its streams go through [`skip_leading_whitespace`].
pub struct VisibleTextSource {
    inner: Arc<dyn GenerationSource>,
}

impl VisibleTextSource {
    pub fn new(inner: Arc<dyn GenerationSource>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl GenerationSource for VisibleTextSource {
    async fn open(&self, request: GenerationRequest) -> anyhow::Result<DeltaStream> {
        let deltas = self.inner.open(request).await?;
        Ok(skip_leading_whitespace(deltas))
    }
}
