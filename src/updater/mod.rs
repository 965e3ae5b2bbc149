//! Chain update subsystem.
//!
//! # Data Flow
//! ```text
//! ChainDescriptor
//!     → chain.rs (OracleClient binding, fatal on malformed config)
//!     → outer loop: cycle → sleep(update_interval) → cycle → ...
//!         cycle = retry(max_retries, retry_delay) {
//!             fetch proof → submit (tx_timeout) → confirm (tx_timeout)
//!         }
//! ```
//!
//! # Design Decisions
//! - One updater per chain; nothing is shared between updaters except the
//!   read-only proof source
//! - Cycles of one chain never overlap

pub mod chain;
pub mod types;

pub use chain::ChainUpdater;
pub use types::{ConstructionError, UpdateError, UpdateSchedule};
