//! Update loop timings and error definitions.

use std::time::Duration;

use alloy::primitives::TxHash;
use thiserror::Error;

use crate::attestation::FetchError;
use crate::blockchain::BlockchainError;
use crate::config::UpdaterConfig;
use crate::resilience::RetryPolicy;

/// Failure of a single attempt within a cycle. Every variant is retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    #[error("price fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The RPC rejected the transaction.
    #[error("submission failed: {0}")]
    Submit(BlockchainError),

    #[error("submission timed out after {}s", .0.as_secs())]
    SubmissionTimeout(Duration),

    #[error("receipt query failed: {0}")]
    Confirm(BlockchainError),

    #[error("confirmation timed out after {}s", .0.as_secs())]
    ConfirmationTimeout(Duration),

    #[error("transaction {tx_hash} reverted in block {block_number}")]
    Reverted { tx_hash: TxHash, block_number: u64 },
}

/// A chain could not be set up. Fatal for the whole process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to initialize {chain}: {source}")]
pub struct ConstructionError {
    /// `name:id` of the chain.
    pub chain: String,
    #[source]
    pub source: BlockchainError,
}

/// Timings shared by every chain updater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSchedule {
    /// Sleep between cycles.
    pub update_interval: Duration,
    /// Attempt budget within a cycle.
    pub retry: RetryPolicy,
    /// Bound on submission and, independently, on confirmation.
    pub tx_timeout: Duration,
    /// Receipt polling interval.
    pub receipt_poll: Duration,
}

impl From<&UpdaterConfig> for UpdateSchedule {
    fn from(config: &UpdaterConfig) -> Self {
        Self {
            update_interval: Duration::from_secs(config.update_interval_secs),
            retry: RetryPolicy::new(config.max_retries, Duration::from_secs(config.retry_delay_secs)),
            tx_timeout: Duration::from_secs(config.tx_timeout_secs),
            receipt_poll: Duration::from_millis(config.receipt_poll_ms),
        }
    }
}

impl Default for UpdateSchedule {
    fn default() -> Self {
        Self::from(&UpdaterConfig::default())
    }
}
