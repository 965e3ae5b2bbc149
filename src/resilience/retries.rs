//! Retry logic.
//!
//! # Responsibilities
//! - Re-run a fallible async operation up to a fixed number of attempts
//! - Wait a fixed delay between attempts
//! - Hand back the last error once the budget is spent
//!
//! # Design Decisions
//! - Every error is retryable; callers decide what to log per attempt
//! - No delay after the final attempt
//! - Attempts are numbered from 1 and passed to the operation

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Attempt budget and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }
}

/// All attempts failed.
#[derive(Debug, Error)]
#[error("gave up after {attempts} attempts: {last_error}")]
pub struct Exhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

/// Run `operation` until it succeeds or the policy's attempts are used up.
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T, Exhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(last_error) if attempt >= max_attempts => {
                return Err(Exhausted {
                    attempts: attempt,
                    last_error,
                })
            }
            Err(_) => {
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
