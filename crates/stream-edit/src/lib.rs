//! # stream-edit
//!
//! Streaming-response aggregator. Consumes a lazy stream of [`DeltaEvent`]s from a generation
//! backend and drives a [`MessageSink`]: one `create` as soon as there is text to show, an
//! `update` with the cumulative text every `batch_interval` deltas, and one final `update`
//! when the stream ends.
//!
//! # Entry points
//!
//! - **[`StreamingResponseAggregator::run`]** – drain a stream into a sink.
//! - **[`StreamingResponseAggregator::run_with_cancel`]** – same, stoppable via a [`CancellationToken`].
//! - **[`StreamingResponseAggregator::run_request`]** – open a [`GenerationSource`] first, then run.
//!
//! [`DeltaEvent`]: llm_client::DeltaEvent
//! [`GenerationSource`]: llm_client::GenerationSource
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

mod aggregator;
mod config;
mod error;
mod join;
mod sink;
mod state;

pub use aggregator::{AggregationOutcome, StreamingResponseAggregator};
pub use config::{AggregatorConfig, InvalidBatchInterval, DEFAULT_BATCH_INTERVAL};
pub use error::{AggregateError, BoxError, SinkOp};
pub use join::join_fragments;
pub use sink::{MessageId, MessageSink};
pub use tokio_util::sync::CancellationToken;
