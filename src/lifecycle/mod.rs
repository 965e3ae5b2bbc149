//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve config → Metrics exporter → Attestation client → Chain updaters
//!
//! Shutdown (shutdown.rs):
//!     Trigger → every chain task leaves its loop
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → immediate exit, no draining
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then clients, then tasks
//! - No graceful drain of in-flight transactions

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::{wait_for_exit_signal, ExitSignal};
pub use startup::StartupError;
