//! # fantoccini-extra
#![allow(clippy::uninlined_format_args)]
//!
//! Ergonomic extras for the [fantoccini](https://docs.rs/fantoccini) WebDriver
//! client: polling waits, click-simulation strategies, and input simulation.
//!
//! Driver commands fail for a living — pages render late, elements detach and
//! reattach, overlays swallow clicks. This crate wraps a connected
//! [`fantoccini::Client`] in a [`Session`] that absorbs the transient noise:
//! every wait is a bounded polling loop that treats "not yet" and "briefly
//! broken" the same way, and every interaction can pick the delivery strategy
//! that actually works on the page at hand.
//!
//! ## Waiting
//!
//! ```no_run
//! use std::time::Duration;
//! use fantoccini_extra::{Session, SessionConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let session = Session::connect("http://localhost:4444", SessionConfig::default()).await?;
//!
//! // Wait (up to the configured budget) for the page to settle
//! if session.wait_for_page_contains("Order complete", None).await? {
//!     println!("checkout finished");
//! }
//!
//! // Existence and visibility as one budget: exists first, displayed second
//! let ready = session
//!     .wait_for_element_ready("#receipt", 0, Some(Duration::from_secs(10)))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Timeout exhaustion is a defined `Ok(false)`, not an error: waits are
//! routinely used to probe ("is the banner gone yet?") and an `Err` would
//! force callers to treat the common case as exceptional.
//!
//! ## Interacting
//!
//! ```no_run
//! use fantoccini_extra::{ClickMethod, InputAdjust, InputMethod, ScrollBehaviour, Session, SessionConfig};
//!
//! # async fn example(session: Session) -> anyhow::Result<()> {
//! // Session defaults
//! session.click("button.submit", 0).await?;
//! session.type_into("input[name='q']", 0, "fantoccini").await?;
//!
//! // Per-call overrides for stubborn pages
//! session
//!     .click_with("button.overlay-blocked", 0, ClickMethod::JsClick, ScrollBehaviour::JsScrollIntoView)
//!     .await?;
//! session
//!     .type_into_with("input#code", 0, "49A7", InputMethod::HumanLike, InputAdjust::ClearFirstTabAfter)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## The polling core
//!
//! The waits above all reduce to one primitive, usable directly with any
//! predicate. A predicate reports `Ok(true)` (done), `Ok(false)` (not yet),
//! or `Err(TransientFault)` (broken this iteration, try again):
//!
//! ```no_run
//! use std::time::Duration;
//! use fantoccini_extra::wait::{wait_until, DEFAULT_POLL_INTERVAL, TransientFault};
//!
//! # async fn example(client: fantoccini::Client) -> anyhow::Result<()> {
//! let client = &client;
//! let logged_in = wait_until(
//!     || async move {
//!         let url = client.current_url().await.map_err(TransientFault::from)?;
//!         Ok(url.path() == "/dashboard")
//!     },
//!     Duration::from_secs(15),
//!     DEFAULT_POLL_INTERVAL,
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Synchronous callers get the same primitives through [`blocking`], which
//! runs them on a dedicated runtime.
//!
//! ## Configuration
//!
//! Defaults live in an immutable [`SessionConfig`] passed at construction —
//! there is no process-wide mutable state, so two sessions with different
//! strategies coexist without surprises.

/// Thread-blocking entry points for the polling waits
pub mod blocking;

/// Capability traits the waits poll through, and the conditions built on them
pub mod capability;

/// Crate error type
pub mod errors;

/// Strategy enums and session configuration
pub mod options;

/// Embedded JavaScript fragments
mod script;

/// The WebDriver session wrapper and its convenience operations
pub mod session;

/// The condition poller and sequential condition chain
pub mod wait;

pub use capability::{TargetLocator, TextSnapshotSource};
pub use errors::{Error, Result};
pub use options::{
    ClickAllOptions, ClickMethod, InputAdjust, InputMethod, ScrollBehaviour, SessionConfig,
};
pub use session::Session;
pub use wait::{
    wait_until, wait_until_chained, TransientFault, DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT,
};
