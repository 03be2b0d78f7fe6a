use std::time::Duration;

use crate::errors::Result;
use crate::wait::{wait_until, wait_until_chained, TransientFault};

/// Produces a string snapshot of the observable content on demand.
///
/// For a live session this is the page source; tests substitute scripted
/// sources. A snapshot may fail transiently (page mid-navigation) — that is
/// a [`TransientFault`], not a hard error.
#[allow(async_fn_in_trait)]
pub trait TextSnapshotSource {
    async fn text_snapshot(&self) -> Result<String, TransientFault>;
}

/// Looks up zero-or-one targets by selector and index and reports visibility.
///
/// Lookup and visibility checks may both fault transiently (target not yet
/// attached, reference gone stale between poll iterations).
#[allow(async_fn_in_trait)]
pub trait TargetLocator {
    type Target;

    async fn locate(&self, selector: &str, index: usize) -> Result<Option<Self::Target>, TransientFault>;

    async fn is_displayed(&self, target: &Self::Target) -> Result<bool, TransientFault>;
}

/// Polls `source` until its snapshot contains `needle`.
pub async fn wait_for_text<S>(
    source: &S,
    needle: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<bool>
where
    S: TextSnapshotSource,
{
    wait_until(
        || async move {
            let snapshot = source.text_snapshot().await?;
            Ok(snapshot.contains(needle))
        },
        timeout,
        interval,
    )
    .await
}

/// Polls `locator` until a target is present at `selector`/`index`.
pub async fn wait_for_target<L>(
    locator: &L,
    selector: &str,
    index: usize,
    timeout: Duration,
    interval: Duration,
) -> Result<bool>
where
    L: TargetLocator,
{
    wait_until(
        || async move { Ok(locator.locate(selector, index).await?.is_some()) },
        timeout,
        interval,
    )
    .await
}

/// Polls `locator` until the target at `selector`/`index` is in a visible
/// state.
///
/// The target is re-located on every iteration; a missing target counts as a
/// transient fault rather than a failed wait, so a target that appears late
/// still succeeds within the budget.
pub async fn wait_for_target_displayed<L>(
    locator: &L,
    selector: &str,
    index: usize,
    timeout: Duration,
    interval: Duration,
) -> Result<bool>
where
    L: TargetLocator,
{
    wait_until(
        || async move {
            match locator.locate(selector, index).await? {
                Some(target) => locator.is_displayed(&target).await,
                None => Err(TransientFault::new(format!(
                    "no target at index {index} for '{selector}'"
                ))),
            }
        },
        timeout,
        interval,
    )
    .await
}

/// Waits for the target to exist, then for it to be displayed, spending the
/// single `timeout` budget across both stages.
///
/// The visibility stage gets whatever the existence stage left over, but
/// always at least one poll interval — a target that flips from "exists" to
/// "displayed" in the same instant is not missed.
pub async fn wait_for_target_ready<L>(
    locator: &L,
    selector: &str,
    index: usize,
    timeout: Duration,
    interval: Duration,
) -> Result<bool>
where
    L: TargetLocator,
{
    wait_until_chained(
        || async move { Ok(locator.locate(selector, index).await?.is_some()) },
        || async move {
            match locator.locate(selector, index).await? {
                Some(target) => locator.is_displayed(&target).await,
                None => Err(TransientFault::new(format!(
                    "no target at index {index} for '{selector}'"
                ))),
            }
        },
        timeout,
        interval,
    )
    .await
}

#[cfg(test)]
#[path = "capability_test.rs"]
mod capability_test;
