// Behavioral tests for the polling waits through the public API

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use fantoccini_extra::wait::{wait_until, wait_until_chained};
use fantoccini_extra::{Error, TransientFault};

#[tokio::test]
async fn poll_cadence_matches_the_stated_interval() {
    // 8-iteration budget at 25 ms; success on the 5th evaluation means four
    // sleeps, so roughly 100 ms of the 200 ms budget is spent.
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();
    let started = Instant::now();

    let result = wait_until(
        move || {
            let calls = calls_clone.clone();
            async move { Ok(calls.fetch_add(1, Ordering::SeqCst) + 1 >= 5) }
        },
        Duration::from_millis(200),
        Duration::from_millis(25),
    )
    .await
    .unwrap();
    let elapsed = started.elapsed();

    assert!(result);
    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert!(elapsed >= Duration::from_millis(100), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(200), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn chained_wait_is_bounded_by_roughly_one_budget() {
    // Both stages poll to exhaustion of their share; the total must stay in
    // the vicinity of the single stated budget, not double it.
    let started = Instant::now();

    let result = wait_until_chained(
        || async { Ok(true) },
        || async { Ok(false) },
        Duration::from_millis(200),
        Duration::from_millis(20),
    )
    .await
    .unwrap();
    let elapsed = started.elapsed();

    assert!(!result);
    assert!(elapsed < Duration::from_millis(350), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn chained_wait_grants_a_minimum_second_stage() {
    // First stage succeeds only on its final iteration; the second stage
    // must still be evaluated rather than starved by rounding.
    let exists_calls = Arc::new(AtomicU32::new(0));
    let exists_clone = exists_calls.clone();
    let displayed_calls = Arc::new(AtomicU32::new(0));
    let displayed_clone = displayed_calls.clone();

    let result = wait_until_chained(
        move || {
            let calls = exists_clone.clone();
            async move { Ok(calls.fetch_add(1, Ordering::SeqCst) + 1 >= 5) }
        },
        move || {
            let calls = displayed_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
        },
        Duration::from_millis(50),
        Duration::from_millis(10),
    )
    .await
    .unwrap();

    assert!(result);
    assert_eq!(exists_calls.load(Ordering::SeqCst), 5);
    assert!(displayed_calls.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn transient_faults_do_not_escape_the_poller() {
    let result = wait_until(
        || async { Err::<bool, _>(TransientFault::new("no such element")) },
        Duration::from_millis(60),
        Duration::from_millis(10),
    )
    .await;

    // The wait fails by exhaustion; the fault itself is never surfaced
    assert!(matches!(result, Ok(false)));
}

#[tokio::test]
async fn misuse_fails_fast_instead_of_looping_zero_times() {
    let result = wait_until(|| async { Ok(true) }, Duration::from_secs(5), Duration::ZERO).await;
    assert!(matches!(result, Err(Error::InvalidPollInterval)));
}

#[test]
fn blocking_entry_point_mirrors_the_async_one() {
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let result = fantoccini_extra::blocking::wait_until(
        move || {
            let calls = calls_clone.clone();
            async move { Ok(calls.fetch_add(1, Ordering::SeqCst) + 1 >= 3) }
        },
        Duration::from_millis(200),
        Duration::from_millis(10),
    )
    .unwrap();

    assert!(result);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
