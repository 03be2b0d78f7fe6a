// Unit tests for the thread-blocking wait entry points

use super::*;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[test]
fn blocking_wait_runs_without_an_ambient_runtime() {
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let result = wait_until(
        move || {
            let calls = calls_clone.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(n >= 2)
            }
        },
        Duration::from_millis(200),
        Duration::from_millis(10),
    )
    .unwrap();

    assert!(result);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn blocking_wait_reports_exhaustion() {
    let result = wait_until(
        || async { Ok(false) },
        Duration::from_millis(50),
        Duration::from_millis(10),
    )
    .unwrap();

    assert!(!result);
}

#[test]
fn blocking_wait_rejects_zero_interval() {
    let result = wait_until(|| async { Ok(true) }, Duration::from_secs(1), Duration::ZERO);
    assert!(matches!(result, Err(Error::InvalidPollInterval)));
}

#[test]
fn blocking_chained_wait_completes_both_stages() {
    let displayed_calls = Arc::new(AtomicU32::new(0));
    let displayed_clone = displayed_calls.clone();

    let result = wait_until_chained(
        || async { Ok(true) },
        move || {
            let calls = displayed_clone.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(n >= 3)
            }
        },
        Duration::from_millis(300),
        Duration::from_millis(10),
    )
    .unwrap();

    assert!(result);
    assert_eq!(displayed_calls.load(Ordering::SeqCst), 3);
}
