use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, trace};

use crate::errors::{Error as CrateError, Result};

/// Delay between successive predicate evaluations unless overridden (250 ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Wait budget used by the session-level wait operations unless overridden (30 s).
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// A recoverable failure raised by a predicate during a single evaluation.
///
/// The polling loop treats this as "not yet" and retries on the next iteration.
/// Anything that is *not* a `TransientFault` — a panic, a programming error —
/// propagates normally, so a predicate opts into retry explicitly.
#[derive(Debug, Clone, Error)]
#[error("transient evaluation fault: {message}")]
pub struct TransientFault {
    message: String,
}

impl TransientFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<fantoccini::error::CmdError> for TransientFault {
    /// Driver commands fail transiently all the time while a page is settling
    /// (stale references, elements not yet attached), so they map directly.
    fn from(err: fantoccini::error::CmdError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Number of whole poll intervals that fit in the budget.
///
/// Full-precision arithmetic: a 2.5 s budget at 250 ms yields 10 iterations.
/// A budget shorter than one interval yields zero iterations, and the wait
/// reports failure without evaluating the predicate at all.
fn iteration_count(timeout: Duration, interval: Duration) -> u64 {
    (timeout.as_nanos() / interval.as_nanos()) as u64
}

/// Repeatedly evaluates `predicate` every `interval` until it succeeds or the
/// `timeout` budget is exhausted.
///
/// Returns `Ok(true)` as soon as the predicate does, with no further delay.
/// `Ok(false)` and [`TransientFault`] both mean "keep polling"; faults are
/// swallowed and never surface to the caller. Running out of budget is a
/// defined `Ok(false)`, not an error.
///
/// The only error this function itself produces is
/// [`Error::InvalidPollInterval`](crate::Error::InvalidPollInterval) for a
/// zero `interval`, raised before the predicate is ever called.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use fantoccini_extra::wait::{wait_until, DEFAULT_POLL_INTERVAL, TransientFault};
///
/// # async fn example(client: fantoccini::Client) -> anyhow::Result<()> {
/// let client = &client;
/// let found = wait_until(
///     || async move {
///         let source = client.source().await.map_err(TransientFault::from)?;
///         Ok(source.contains("checkout-complete"))
///     },
///     Duration::from_secs(10),
///     DEFAULT_POLL_INTERVAL,
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn wait_until<F, Fut>(mut predicate: F, timeout: Duration, interval: Duration) -> Result<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, TransientFault>>,
{
    if interval.is_zero() {
        return Err(CrateError::InvalidPollInterval);
    }

    let max_iterations = iteration_count(timeout, interval);
    for iteration in 0..max_iterations {
        match predicate().await {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(fault) => {
                trace!(iteration, fault = %fault, "predicate fault, retrying");
            }
        }

        // No point sleeping once the budget is spent
        if iteration + 1 < max_iterations {
            sleep(interval).await;
        }
    }

    debug!(?timeout, max_iterations, "condition not met within budget");
    Ok(false)
}

/// Runs two waits back-to-back: `exists` with the full `timeout`, then
/// `displayed` with whatever budget is left.
///
/// The second stage's budget is clamped to at least one `interval`, so a
/// target that exists at the very end of the budget still gets one visibility
/// check instead of being lost to rounding. If the first stage fails the
/// second is never evaluated and the call returns `Ok(false)`.
///
/// The combined call is bounded by `timeout` plus one interval in the worst
/// case; when the first stage resolves early the remainder of the budget
/// carries over rather than being granted twice.
pub async fn wait_until_chained<F1, Fut1, F2, Fut2>(
    exists: F1,
    displayed: F2,
    timeout: Duration,
    interval: Duration,
) -> Result<bool>
where
    F1: FnMut() -> Fut1,
    Fut1: Future<Output = Result<bool, TransientFault>>,
    F2: FnMut() -> Fut2,
    Fut2: Future<Output = Result<bool, TransientFault>>,
{
    if interval.is_zero() {
        return Err(CrateError::InvalidPollInterval);
    }

    let started = Instant::now();
    if !wait_until(exists, timeout, interval).await? {
        return Ok(false);
    }

    let remaining = timeout.saturating_sub(started.elapsed()).max(interval);
    trace!(?remaining, "first stage met, polling second stage");
    wait_until(displayed, remaining, interval).await
}

#[cfg(test)]
#[path = "wait_test.rs"]
mod wait_test;
