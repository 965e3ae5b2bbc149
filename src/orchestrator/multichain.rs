//! Coordinates one updater per configured chain.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::attestation::ProofSource;
use crate::config::ResolvedConfig;
use crate::lifecycle::Shutdown;
use crate::updater::{ChainUpdater, ConstructionError, UpdateSchedule};

/// Runs every enabled chain concurrently.
#[derive(Debug)]
pub struct MultichainOrchestrator {
    updaters: Vec<ChainUpdater>,
}

impl MultichainOrchestrator {
    /// Construct an updater for every chain in `config`.
    ///
    /// Any chain failing to construct aborts the whole orchestrator; no chain
    /// is started in that case.
    pub fn from_config(
        config: &ResolvedConfig,
        source: Arc<dyn ProofSource>,
    ) -> Result<Self, ConstructionError> {
        tracing::info!(chains = config.chains.len(), "Initializing multichain orchestrator");

        let schedule = UpdateSchedule::from(&config.updater);
        let mut updaters = Vec::with_capacity(config.chains.len());

        for chain in &config.chains {
            match ChainUpdater::connect(chain, source.clone(), schedule) {
                Ok(updater) => {
                    tracing::info!(chain = %chain.chain_name, chain_id = chain.chain_id, "Chain initialized");
                    updaters.push(updater);
                }
                Err(e) => {
                    tracing::error!(
                        chain = %chain.chain_name,
                        chain_id = chain.chain_id,
                        error = %e,
                        "Chain failed to initialize"
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!(active_chains = updaters.len(), "Multichain orchestrator initialized");
        Ok(Self { updaters })
    }

    /// Wrap already constructed updaters.
    pub fn from_updaters(updaters: Vec<ChainUpdater>) -> Self {
        Self { updaters }
    }

    /// Number of chains that will be started.
    pub fn chain_count(&self) -> usize {
        self.updaters.len()
    }

    /// `name:id` labels, in configuration order.
    pub fn chain_labels(&self) -> Vec<String> {
        self.updaters.iter().map(|u| u.label().to_string()).collect()
    }

    /// Spawn every updater as its own task.
    ///
    /// Each task yields its chain label when it stops.
    pub fn start_all(self, shutdown: &Shutdown) -> JoinSet<String> {
        tracing::info!(chains = self.updaters.len(), "Starting price updates for all chains");

        let mut tasks = JoinSet::new();
        for updater in self.updaters {
            let label = updater.label().to_string();
            let stop = shutdown.subscribe();
            tasks.spawn(async move {
                updater.run(stop).await;
                label
            });
        }
        tasks
    }

    /// Start all chains and wait until every one has stopped.
    pub async fn run(self, shutdown: &Shutdown) {
        let mut tasks = self.start_all(shutdown);

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(label) => tracing::info!(chain = %label, "Chain updater stopped"),
                Err(e) => tracing::error!(error = %e, "Chain updater task failed"),
            }
        }
    }
}
