use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by this crate.
///
/// Transient faults raised inside a wait predicate are absorbed by the polling
/// loop and never appear here; see [`crate::wait::TransientFault`].
#[derive(Debug, Error)]
pub enum Error {
    /// A wait was requested with a zero poll interval
    #[error("poll interval must be greater than zero")]
    InvalidPollInterval,

    /// Fewer elements matched the selector than the requested index
    #[error("no element at index {index} for selector '{selector}' ({found} found)")]
    ElementIndex {
        selector: String,
        index: usize,
        found: usize,
    },

    /// A WebDriver command failed
    #[error("webdriver command failed: {0}")]
    Webdriver(#[from] fantoccini::error::CmdError),

    /// Creating the WebDriver session failed
    #[error("failed to create webdriver session: {0}")]
    NewSession(#[from] fantoccini::error::NewSessionError),

    /// The WebDriver endpoint could not be reached or is not a valid URL
    #[error("cannot reach WebDriver at {url}: {reason}")]
    Connect { url: String, reason: String },

    /// A script argument could not be encoded as JSON
    #[error("failed to encode script argument: {0}")]
    ScriptArg(#[from] serde_json::Error),

    /// A new tab was requested but no new window handle appeared
    #[error("new tab did not open within {timeout:?}")]
    TabOpen { timeout: Duration },

    /// The dedicated runtime for a blocking wait could not be built
    #[error("failed to build blocking runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
