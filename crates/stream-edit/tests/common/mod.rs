//! Recording [`MessageSink`] and scripted delta streams shared by the aggregator tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use llm_client::DeltaEvent;
use stream_edit::{CancellationToken, MessageId, MessageSink};

/// One recorded sink call, in call order. Failed calls are recorded too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Create(String),
    Update(MessageId, String),
}

/// Sink that records every call and can be told to fail or to cancel a token.
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
    fail_create: bool,
    /// 1-based index of the update call that fails.
    fail_update_at: Option<usize>,
    cancel_on_create: Option<CancellationToken>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    pub fn failing_update_at(n: usize) -> Self {
        Self {
            fail_update_at: Some(n),
            ..Self::default()
        }
    }

    pub fn cancelling_on_create(token: CancellationToken) -> Self {
        Self {
            cancel_on_create: Some(token),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, SinkCall::Create(_)))
            .count()
    }

    pub fn updates(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SinkCall::Update(_, text) => Some(text),
                SinkCall::Create(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn create(&self, text: &str) -> anyhow::Result<MessageId> {
        self.calls
            .lock()
            .unwrap()
            .push(SinkCall::Create(text.to_string()));
        if let Some(token) = &self.cancel_on_create {
            token.cancel();
        }
        if self.fail_create {
            anyhow::bail!("Bad Request: chat not found");
        }
        Ok("1".to_string())
    }

    async fn update(&self, id: &MessageId, text: &str) -> anyhow::Result<()> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(SinkCall::Update(id.clone(), text.to_string()));
            calls
                .iter()
                .filter(|c| matches!(c, SinkCall::Update(..)))
                .count()
        };
        if self.fail_update_at == Some(n) {
            anyhow::bail!("Too Many Requests: retry after 3");
        }
        Ok(())
    }
}

/// Scripted stream: `Some(s)` is a delta with content `s`, `None` a delta without content.
pub fn deltas(pieces: &[Option<&str>]) -> BoxStream<'static, anyhow::Result<DeltaEvent>> {
    let items: Vec<anyhow::Result<DeltaEvent>> = pieces
        .iter()
        .map(|p| {
            Ok(DeltaEvent {
                content: p.map(str::to_string),
            })
        })
        .collect();
    stream::iter(items).boxed()
}

/// Scripted stream of text deltas.
pub fn text_deltas(pieces: &[&str]) -> BoxStream<'static, anyhow::Result<DeltaEvent>> {
    let pieces: Vec<Option<&str>> = pieces.iter().map(|p| Some(*p)).collect();
    deltas(&pieces)
}

/// `w1`, `w2`, ... `wn`.
pub fn words(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("w{}", i)).collect()
}
