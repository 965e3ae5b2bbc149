//! Multichain oracle price pusher.
//!
//! Fetches signed price update proofs from the Pyth Hermes service and pushes
//! them to oracle contracts on every configured EVM chain, one independent
//! task per chain.

pub mod attestation;
pub mod blockchain;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod orchestrator;
pub mod resilience;
pub mod updater;

pub use config::ResolvedConfig;
pub use lifecycle::Shutdown;
pub use orchestrator::MultichainOrchestrator;
pub use updater::ChainUpdater;
