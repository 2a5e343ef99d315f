//! The aggregation loop. One run owns one [`AggregationState`]; sink calls are awaited one at a
//! time, in generation order.

use futures::{Stream, StreamExt};
use llm_client::{DeltaEvent, GenerationRequest, GenerationSource};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::AggregatorConfig;
use crate::error::{AggregateError, SinkOp};
use crate::sink::{MessageId, MessageSink};
use crate::state::{AggregationState, Step};

/// How a run ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationOutcome {
    /// The stream ended and the final text was written to `message_id`.
    Completed {
        message_id: MessageId,
        text: String,
        /// Update calls made, the final one included.
        updates: usize,
    },
    /// The stream ended without any displayable content; nothing was sent.
    Empty,
    /// Cancellation was observed; the last applied edit stands.
    Cancelled {
        message_id: Option<MessageId>,
        text: String,
    },
}

/// Maps a delta stream onto one created message plus batched edits.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamingResponseAggregator {
    config: AggregatorConfig,
}

impl StreamingResponseAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Drains `deltas` into `sink` until the stream ends or fails.
    pub async fn run<S>(
        &self,
        deltas: S,
        sink: &dyn MessageSink,
    ) -> Result<AggregationOutcome, AggregateError>
    where
        S: Stream<Item = anyhow::Result<DeltaEvent>>,
    {
        self.run_with_cancel(deltas, sink, &CancellationToken::new())
            .await
    }

    /// Like [`Self::run`], but stops as soon as `cancel` fires. No sink call is made once
    /// cancellation has been observed.
    #[instrument(skip_all, fields(batch_interval = self.config.batch_interval()))]
    pub async fn run_with_cancel<S>(
        &self,
        deltas: S,
        sink: &dyn MessageSink,
        cancel: &CancellationToken,
    ) -> Result<AggregationOutcome, AggregateError>
    where
        S: Stream<Item = anyhow::Result<DeltaEvent>>,
    {
        let mut deltas = std::pin::pin!(deltas);
        let mut state = AggregationState::new(self.config.batch_interval());
        let mut updates = 0usize;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(cancelled(state)),
                next = deltas.next() => next,
            };

            let delta = match next {
                None => break,
                Some(Ok(delta)) => delta,
                Some(Err(e)) => {
                    let (message_id, partial_text) = state.into_parts();
                    warn!(
                        error = %e,
                        message_id = ?message_id,
                        partial_len = partial_text.len(),
                        "Generation stream failed"
                    );
                    return Err(AggregateError::GenerationStream {
                        partial_text,
                        message_id,
                        source: e.into(),
                    });
                }
            };

            match state.apply(delta) {
                Step::Nothing => {}
                Step::Create(text) => {
                    if cancel.is_cancelled() {
                        return Ok(cancelled(state));
                    }
                    match sink.create(&text).await {
                        Ok(message_id) => {
                            debug!(message_id = %message_id, len = text.len(), "Created outgoing message");
                            state.created(message_id);
                        }
                        Err(e) => return Err(sink_error(SinkOp::Create, state, e)),
                    }
                }
                Step::Update(message_id, text) => {
                    if cancel.is_cancelled() {
                        return Ok(cancelled(state));
                    }
                    if let Err(e) = sink.update(&message_id, &text).await {
                        return Err(sink_error(SinkOp::Update, state, e));
                    }
                    updates += 1;
                    debug!(message_id = %message_id, len = text.len(), "Periodic edit");
                }
            }
        }

        if cancel.is_cancelled() {
            return Ok(cancelled(state));
        }

        let Some((message_id, text)) = state.finish() else {
            info!("Generation produced no content; nothing sent");
            return Ok(AggregationOutcome::Empty);
        };
        if let Err(e) = sink.update(&message_id, &text).await {
            return Err(sink_error(SinkOp::Update, state, e));
        }
        updates += 1;

        info!(
            message_id = %message_id,
            fragments = state.fragment_len(),
            updates = updates,
            len = text.len(),
            "Streamed reply complete"
        );
        Ok(AggregationOutcome::Completed {
            message_id,
            text,
            updates,
        })
    }

    /// Opens `request` on `source`, then runs. A failure to open is a generation stream error
    /// with no partial text.
    pub async fn run_request(
        &self,
        source: &dyn GenerationSource,
        request: GenerationRequest,
        sink: &dyn MessageSink,
        cancel: &CancellationToken,
    ) -> Result<AggregationOutcome, AggregateError> {
        let deltas = source
            .open(request)
            .await
            .map_err(|e| AggregateError::GenerationStream {
                partial_text: String::new(),
                message_id: None,
                source: e.into(),
            })?;
        self.run_with_cancel(deltas, sink, cancel).await
    }
}

fn cancelled(state: AggregationState) -> AggregationOutcome {
    info!(
        message_id = ?state.message_id(),
        fragments = state.fragment_len(),
        len = state.text().len(),
        "Aggregation cancelled"
    );
    let (message_id, text) = state.into_parts();
    AggregationOutcome::Cancelled { message_id, text }
}

fn sink_error(op: SinkOp, state: AggregationState, e: anyhow::Error) -> AggregateError {
    warn!(op = %op, error = %e, message_id = ?state.message_id(), "Message sink rejected write");
    let (message_id, partial_text) = state.into_parts();
    AggregateError::SinkWrite {
        op,
        partial_text,
        message_id,
        source: e.into(),
    }
}
