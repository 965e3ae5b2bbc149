//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Provide a per-chain logging capability carrying the chain identity
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured default level
//! - Chain identity is emitted as structured fields (`chain`, `chain_id`)

use std::fmt;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// `default_level` applies to this crate when `RUST_LOG` is unset.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("oracle_pusher={},warn", default_level)));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Logger bound to one chain.
///
/// Every event carries the chain's name and id, so interleaved output from
/// concurrent chains stays attributable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLogger {
    chain_name: String,
    chain_id: u64,
}

impl ChainLogger {
    pub fn new(chain_name: impl Into<String>, chain_id: u64) -> Self {
        Self {
            chain_name: chain_name.into(),
            chain_id,
        }
    }

    /// `[name:id]` prefix.
    pub fn prefix(&self) -> String {
        format!("[{}:{}]", self.chain_name, self.chain_id)
    }

    pub fn chain_name(&self) -> &str {
        &self.chain_name
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn info(&self, message: impl fmt::Display) {
        tracing::info!(chain = %self.chain_name, chain_id = self.chain_id, "{} {}", self.prefix(), message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        tracing::warn!(chain = %self.chain_name, chain_id = self.chain_id, "{} {}", self.prefix(), message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        tracing::error!(chain = %self.chain_name, chain_id = self.chain_id, "{} {}", self.prefix(), message);
    }

    pub fn debug(&self, message: impl fmt::Display) {
        tracing::debug!(chain = %self.chain_name, chain_id = self.chain_id, "{} {}", self.prefix(), message);
    }
}
