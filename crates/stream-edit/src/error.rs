use std::fmt;

use thiserror::Error;

use crate::sink::MessageId;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which sink call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkOp {
    Create,
    Update,
}

impl fmt::Display for SinkOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkOp::Create => f.write_str("create"),
            SinkOp::Update => f.write_str("update"),
        }
    }
}

/// A failed aggregation run. Both variants carry the text accumulated before the failure and
/// the id of the created message, if any, so the caller can flush or apologize.
#[derive(Error, Debug)]
pub enum AggregateError {
    /// The generation backend failed to open or failed mid-stream.
    #[error("generation stream failed: {source}")]
    GenerationStream {
        partial_text: String,
        message_id: Option<MessageId>,
        #[source]
        source: BoxError,
    },

    /// The messaging channel rejected a create or update. Not retried.
    #[error("message sink {op} failed: {source}")]
    SinkWrite {
        op: SinkOp,
        partial_text: String,
        message_id: Option<MessageId>,
        #[source]
        source: BoxError,
    },
}

impl AggregateError {
    pub fn partial_text(&self) -> &str {
        match self {
            AggregateError::GenerationStream { partial_text, .. }
            | AggregateError::SinkWrite { partial_text, .. } => partial_text,
        }
    }

    pub fn message_id(&self) -> Option<&str> {
        match self {
            AggregateError::GenerationStream { message_id, .. }
            | AggregateError::SinkWrite { message_id, .. } => message_id.as_deref(),
        }
    }
}
