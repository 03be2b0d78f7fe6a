//! Thread-blocking twins of the polling waits.
//!
//! Each function builds a dedicated single-thread runtime and drives the
//! cooperative wait to completion on it. They exist for synchronous callers
//! (test harnesses, build scripts) and must NOT be called from inside an
//! async context — block a worker thread from a runtime and the runtime
//! panics.

use std::future::Future;
use std::time::Duration;

use crate::errors::{Error, Result};
use crate::wait::{self, TransientFault};

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(Error::Runtime)
}

/// Blocking form of [`wait::wait_until`].
pub fn wait_until<F, Fut>(predicate: F, timeout: Duration, interval: Duration) -> Result<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, TransientFault>>,
{
    runtime()?.block_on(wait::wait_until(predicate, timeout, interval))
}

/// Blocking form of [`wait::wait_until_chained`].
pub fn wait_until_chained<F1, Fut1, F2, Fut2>(
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
    runtime()?.block_on(wait::wait_until_chained(exists, displayed, timeout, interval))
}

#[cfg(test)]
#[path = "blocking_test.rs"]
mod blocking_test;
