use std::num::NonZeroUsize;

use thiserror::Error;

/// Edits are batched to one per this many deltas unless configured otherwise.
pub const DEFAULT_BATCH_INTERVAL: usize = 7;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("batch interval must be a positive integer, got {0}")]
pub struct InvalidBatchInterval(pub usize);

/// Aggregator tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorConfig {
    batch_interval: NonZeroUsize,
}

impl AggregatorConfig {
    pub fn new(batch_interval: NonZeroUsize) -> Self {
        Self { batch_interval }
    }

    /// Number of deltas (counted after the message is created) between periodic edits.
    pub fn batch_interval(&self) -> usize {
        self.batch_interval.get()
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            batch_interval: NonZeroUsize::new(DEFAULT_BATCH_INTERVAL)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl TryFrom<usize> for AggregatorConfig {
    type Error = InvalidBatchInterval;

    fn try_from(batch_interval: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(batch_interval)
            .map(Self::new)
            .ok_or(InvalidBatchInterval(batch_interval))
    }
}
