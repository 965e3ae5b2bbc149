//! Multichain orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! ResolvedConfig + shared ProofSource
//!     → multichain.rs (construct all updaters, fail fast)
//!     → one tokio task per chain
//!     → tasks stop on the shutdown broadcast
//! ```
//!
//! # Design Decisions
//! - Construction is all-or-nothing across chains
//! - Once running, a chain's failures (or a panic) never reach its siblings

pub mod multichain;

pub use multichain::MultichainOrchestrator;
