//! Timeout enforcement.
//!
//! # Responsibilities
//! - Race an operation against a timer
//! - Report expiry as a distinct error carrying the configured bound
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - The losing future is dropped locally, which does not undo side effects it
//!   already caused: a transaction broadcast before expiry may still be mined

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The operation did not finish within the given bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timed out after {}s", .0.as_secs_f64())]
pub struct TimedOut(pub Duration);

/// Run `operation`, failing with [`TimedOut`] if it takes longer than `duration`.
pub async fn with_timeout<F>(duration: Duration, operation: F) -> Result<F::Output, TimedOut>
where
    F: Future,
{
    tokio::time::timeout(duration, operation)
        .await
        .map_err(|_| TimedOut(duration))
}
