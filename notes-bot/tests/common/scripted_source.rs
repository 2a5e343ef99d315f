//! [`GenerationSource`] that replays a fixed script and records the requests it was opened with.

use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use llm_client::{DeltaEvent, DeltaStream, GenerationRequest, GenerationSource};

#[derive(Debug, Clone)]
pub enum ScriptItem {
    Delta(Option<String>),
    Fail(String),
}

#[derive(Default)]
pub struct ScriptedSource {
    script: Vec<ScriptItem>,
    fail_open: bool,
    /// Stream stays open after the script instead of ending.
    hang: bool,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedSource {
    /// Yields each piece as one delta, then ends.
    pub fn texts(pieces: &[&str]) -> Self {
        Self {
            script: pieces
                .iter()
                .map(|p| ScriptItem::Delta(Some(p.to_string())))
                .collect(),
            ..Self::default()
        }
    }

    pub fn items(script: Vec<ScriptItem>) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    pub fn hanging_after(pieces: &[&str]) -> Self {
        Self {
            hang: true,
            ..Self::texts(pieces)
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationSource for ScriptedSource {
    async fn open(&self, request: GenerationRequest) -> anyhow::Result<DeltaStream> {
        self.requests.lock().unwrap().push(request);
        if self.fail_open {
            return Err(anyhow!("connection refused"));
        }
        let items: Vec<anyhow::Result<DeltaEvent>> = self
            .script
            .iter()
            .map(|item| match item {
                ScriptItem::Delta(content) => Ok(DeltaEvent {
                    content: content.clone(),
                }),
                ScriptItem::Fail(e) => Err(anyhow!("{}", e)),
            })
            .collect();
        let scripted = stream::iter(items);
        if self.hang {
            Ok(scripted.chain(stream::pending()).boxed())
        } else {
            Ok(scripted.boxed())
        }
    }
}
