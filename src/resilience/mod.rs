//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! One update cycle:
//!     → retries.rs (fixed attempt budget, fixed delay)
//!         → timeouts.rs (bound each external step)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Combinators are generic and know nothing about chains or oracles

pub mod retries;
pub mod timeouts;

pub use retries::{retry, Exhausted, RetryPolicy};
pub use timeouts::{with_timeout, TimedOut};
