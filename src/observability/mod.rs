//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Chain updaters produce:
//!     → logging.rs (structured log events tagged with the chain)
//!     → metrics.rs (attempt/cycle counters, last-update gauge)
//!
//! Consumers:
//!     → stdout (log aggregation)
//!     → optional Prometheus scrape endpoint
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, ChainLogger};
