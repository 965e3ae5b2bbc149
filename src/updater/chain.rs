//! Per-chain update loop.
//!
//! # Responsibilities
//! - Own one chain's oracle binding
//! - Run fetch → submit → confirm with a bounded retry budget
//! - Sleep between cycles until shut down
//!
//! # Design Decisions
//! - Cycle failures are logged and never leave the loop
//! - Submission and confirmation each get the full transaction timeout
//! - Construction errors are the only fatal errors

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::attestation::ProofSource;
use crate::blockchain::{ConfirmationStatus, OracleClient, OracleWriter};
use crate::config::ChainDescriptor;
use crate::observability::metrics::{record_attempt, record_cycle, CycleOutcome};
use crate::observability::ChainLogger;
use crate::resilience::{retry, with_timeout, Exhausted};
use crate::updater::types::{ConstructionError, UpdateError, UpdateSchedule};

/// Upper bound on the startup chain-id check, which only ever warns.
const CHAIN_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Drives oracle updates for exactly one chain.
pub struct ChainUpdater {
    logger: ChainLogger,
    label: String,
    source: Arc<dyn ProofSource>,
    oracle: Box<dyn OracleWriter>,
    schedule: UpdateSchedule,
}

impl ChainUpdater {
    /// Assemble an updater from its parts.
    pub fn new(
        logger: ChainLogger,
        source: Arc<dyn ProofSource>,
        oracle: Box<dyn OracleWriter>,
        schedule: UpdateSchedule,
    ) -> Self {
        let label = format!("{}:{}", logger.chain_name(), logger.chain_id());
        Self {
            logger,
            label,
            source,
            oracle,
            schedule,
        }
    }

    /// Bind to the chain described by `chain`.
    ///
    /// Fails if the RPC URL, the private key or the oracle address is malformed.
    pub fn connect(
        chain: &ChainDescriptor,
        source: Arc<dyn ProofSource>,
        schedule: UpdateSchedule,
    ) -> Result<Self, ConstructionError> {
        let logger = ChainLogger::new(chain.chain_name.clone(), chain.chain_id);

        let client = OracleClient::connect(chain, schedule.receipt_poll).map_err(|source| {
            ConstructionError {
                chain: chain.label(),
                source,
            }
        })?;

        logger.info(format_args!(
            "Initialized oracle updater (oracle {}, wallet {})",
            client.oracle_address(),
            client.wallet_address()
        ));

        Ok(Self::new(logger, source, Box::new(client), schedule))
    }

    /// `name:id` of the chain.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn logger(&self) -> &ChainLogger {
        &self.logger
    }

    /// Run cycles until `shutdown` fires.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tokio::select! {
            _ = self.run_forever() => {}
            _ = shutdown.recv() => {
                self.logger.info("Shutdown signal received, stopping price updates");
            }
        }
    }

    async fn run_forever(&self) {
        self.logger.info("Starting price updates");
        self.check_chain().await;

        loop {
            // Failures are already logged inside the cycle.
            let _ = self.run_cycle().await;

            self.logger.debug(format_args!(
                "Next update in {}s",
                self.schedule.update_interval.as_secs()
            ));
            tokio::time::sleep(self.schedule.update_interval).await;
        }
    }

    /// Warn when the RPC serves a different chain than configured.
    async fn check_chain(&self) {
        let limit = self.schedule.tx_timeout.min(CHAIN_CHECK_TIMEOUT);
        match with_timeout(limit, self.oracle.verify_chain_id()).await {
            Ok(Ok(())) => self.logger.debug("Chain ID verified"),
            Ok(Err(e)) => self.logger.warn(format_args!("Chain verification failed: {}", e)),
            Err(elapsed) => self.logger.warn(format_args!("Chain verification {}", elapsed)),
        }
    }

    /// One bounded-retry update cycle.
    pub async fn run_cycle(&self) -> Result<ConfirmationStatus, Exhausted<UpdateError>> {
        let policy = self.schedule.retry;

        let result = retry(policy, |attempt| async move {
            let outcome = self.attempt().await;
            if let Err(e) = &outcome {
                if attempt < policy.max_attempts {
                    self.logger.warn(format_args!(
                        "Attempt {}/{} failed: {}; retrying in {}s",
                        attempt,
                        policy.max_attempts,
                        e,
                        policy.delay.as_secs()
                    ));
                } else {
                    self.logger.warn(format_args!(
                        "Attempt {}/{} failed: {}",
                        attempt, policy.max_attempts, e
                    ));
                }
            }
            outcome
        })
        .await;

        match &result {
            Ok(_) => record_cycle(&self.label, CycleOutcome::Success),
            Err(exhausted) => {
                record_cycle(&self.label, CycleOutcome::Exhausted);
                self.logger.error(format_args!("Failed to update prices: {}", exhausted));
            }
        }
        result
    }

    async fn attempt(&self) -> Result<ConfirmationStatus, UpdateError> {
        record_attempt(&self.label);

        let proof = self.source.fetch_latest_proof().await?;
        self.logger.info(format_args!(
            "Received price data ({} bytes, {} feeds)",
            proof.data.len(),
            proof.feed_ids.len()
        ));

        let tx_hash = with_timeout(self.schedule.tx_timeout, self.oracle.submit_update(&proof))
            .await
            .map_err(|elapsed| UpdateError::SubmissionTimeout(elapsed.0))?
            .map_err(UpdateError::Submit)?;
        self.logger.info(format_args!("Update transaction submitted: {}", tx_hash));

        let status = with_timeout(self.schedule.tx_timeout, self.oracle.wait_for_receipt(tx_hash))
            .await
            .map_err(|elapsed| UpdateError::ConfirmationTimeout(elapsed.0))?
            .map_err(UpdateError::Confirm)?;

        match status {
            ConfirmationStatus::Confirmed { block_number, .. } => {
                self.logger.info(format_args!(
                    "Update transaction confirmed: {} (block {})",
                    tx_hash, block_number
                ));
                Ok(status)
            }
            ConfirmationStatus::Reverted {
                tx_hash,
                block_number,
            } => Err(UpdateError::Reverted {
                tx_hash,
                block_number,
            }),
        }
    }
}

impl std::fmt::Debug for ChainUpdater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainUpdater")
            .field("chain", &self.label)
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}
