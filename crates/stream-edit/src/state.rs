//! Per-run aggregation state: Empty → Streaming → Done.

use llm_client::DeltaEvent;

use crate::join::push_fragment;
use crate::sink::MessageId;

#[derive(Debug)]
enum Phase {
    /// No message created yet.
    Empty,
    /// One message exists; every further delta is counted.
    Streaming {
        message_id: MessageId,
        fragment_count: usize,
    },
}

/// What the run must do with the sink after applying a delta.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Step {
    Nothing,
    Create(String),
    Update(MessageId, String),
}

/// Owned by a single run, never shared.
#[derive(Debug)]
pub(crate) struct AggregationState {
    fragments: Vec<String>,
    /// `fragments` joined; kept in step so edits do not re-join the whole history.
    display: String,
    phase: Phase,
    batch_interval: usize,
}

impl AggregationState {
    pub(crate) fn new(batch_interval: usize) -> Self {
        Self {
            fragments: Vec::new(),
            display: String::new(),
            phase: Phase::Empty,
            batch_interval,
        }
    }

    pub(crate) fn apply(&mut self, delta: DeltaEvent) -> Step {
        if let Some(text) = delta.text() {
            push_fragment(&mut self.display, text);
            self.fragments.push(text.to_string());
        }
        match &mut self.phase {
            Phase::Empty => {
                if self.display.is_empty() {
                    Step::Nothing
                } else {
                    Step::Create(self.display.clone())
                }
            }
            Phase::Streaming {
                message_id,
                fragment_count,
            } => {
                *fragment_count += 1;
                if *fragment_count % self.batch_interval == 0 {
                    Step::Update(message_id.clone(), self.display.clone())
                } else {
                    Step::Nothing
                }
            }
        }
    }

    /// Records the id returned by a successful create.
    pub(crate) fn created(&mut self, message_id: MessageId) {
        self.phase = Phase::Streaming {
            message_id,
            fragment_count: 0,
        };
    }

    /// The terminal update, or `None` when nothing was ever shown.
    pub(crate) fn finish(&self) -> Option<(MessageId, String)> {
        match &self.phase {
            Phase::Empty => None,
            Phase::Streaming { message_id, .. } => {
                Some((message_id.clone(), self.display.clone()))
            }
        }
    }

    pub(crate) fn message_id(&self) -> Option<&MessageId> {
        match &self.phase {
            Phase::Empty => None,
            Phase::Streaming { message_id, .. } => Some(message_id),
        }
    }

    pub(crate) fn text(&self) -> &str {
        &self.display
    }

    pub(crate) fn fragment_len(&self) -> usize {
        self.fragments.len()
    }

    /// Consumes the state into (message id, text) for an error or outcome.
    pub(crate) fn into_parts(self) -> (Option<MessageId>, String) {
        let message_id = match self.phase {
            Phase::Empty => None,
            Phase::Streaming { message_id, .. } => Some(message_id),
        };
        (message_id, self.display)
    }
}
