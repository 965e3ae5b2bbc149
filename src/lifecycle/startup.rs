//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration
//! - Start the metrics exporter when configured
//! - Build the attestation client and every chain updater
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Nothing touches the network before all chains are constructed

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::attestation::{FetchError, HermesClient};
use crate::config::{self, ConfigError, ResolvedConfig};
use crate::observability::metrics::init_metrics;
use crate::orchestrator::MultichainOrchestrator;
use crate::updater::ConstructionError;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("attestation client error: {0}")]
    Attestation(#[from] FetchError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error("metrics exporter error: {0}")]
    Metrics(String),
}

/// Resolve the configuration at `path` and log the chain list.
pub fn load(path: &Path) -> Result<ResolvedConfig, StartupError> {
    let resolved = config::resolve(path)?;

    tracing::info!(
        path = %path.display(),
        chains = resolved.chains.len(),
        interval_secs = resolved.updater.update_interval_secs,
        max_retries = resolved.updater.max_retries,
        "Configuration loaded"
    );
    for (label, enabled) in chain_roster(&resolved) {
        tracing::info!(
            chain = %label,
            status = if enabled { "enabled" } else { "disabled" },
            "Configured chain"
        );
    }

    Ok(resolved)
}

/// Every configured chain with whether it will run; enabled chains first.
pub fn chain_roster(resolved: &ResolvedConfig) -> Vec<(String, bool)> {
    resolved
        .chains
        .iter()
        .map(|chain| (chain.label(), true))
        .chain(resolved.disabled.iter().map(|label| (label.clone(), false)))
        .collect()
}

/// Build the orchestrator for `resolved`.
pub fn build(resolved: &ResolvedConfig) -> Result<MultichainOrchestrator, StartupError> {
    if let Some(address) = &resolved.observability.metrics_address {
        let addr = address
            .parse::<SocketAddr>()
            .map_err(|e| StartupError::Metrics(format!("invalid address '{}': {}", address, e)))?;
        init_metrics(addr).map_err(StartupError::Metrics)?;
    }

    let hermes = HermesClient::new(&resolved.attestation)?;
    let orchestrator = MultichainOrchestrator::from_config(resolved, Arc::new(hermes))?;
    Ok(orchestrator)
}
