use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::wait::{DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT};

/// How a click is delivered to an element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickMethod {
    /// Plain WebDriver element click
    #[default]
    Standard,
    /// Pointer move, press, and release through the Actions API
    MouseAction,
    /// `element.click()` executed in the page
    JsClick,
    /// Synthetic `click` event dispatched on the element
    JsEventSimulation,
}

/// Whether to scroll an element into view before interacting with it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehaviour {
    /// Leave the viewport where it is
    #[default]
    None,
    /// `element.scrollIntoView()` executed in the page
    JsScrollIntoView,
}

/// How keystrokes are delivered to an element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMethod {
    /// The whole string in one WebDriver send-keys call
    #[default]
    SendKeys,
    /// One character at a time with a short random pause after each
    HumanLike,
}

/// Extra actions around the keystrokes themselves. Useful for form fields
/// that validate on blur or carry stale content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAdjust {
    #[default]
    None,
    /// Clear the field before typing
    ClearFirst,
    /// Append a Tab keystroke after the text
    TabAfter,
    /// Both: clear before, Tab after
    ClearFirstTabAfter,
}

/// Immutable per-session defaults, supplied at construction.
///
/// Every session operation that takes an explicit strategy or timeout also has
/// a variant that falls back to these values. There is no process-wide state:
/// two sessions with different configs never observe each other.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub click_method: ClickMethod,
    pub scroll_behaviour: ScrollBehaviour,
    pub input_method: InputMethod,
    pub input_adjust: InputAdjust,
    /// Budget for [`wait_for_page_contains`](crate::Session::wait_for_page_contains)
    pub page_contains_timeout: Duration,
    /// Budget for [`wait_for_element`](crate::Session::wait_for_element)
    pub element_exists_timeout: Duration,
    /// Budget for [`wait_for_element_displayed`](crate::Session::wait_for_element_displayed)
    pub element_displayed_timeout: Duration,
    /// Delay between poll iterations in all wait operations
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            click_method: ClickMethod::Standard,
            scroll_behaviour: ScrollBehaviour::None,
            input_method: InputMethod::SendKeys,
            input_adjust: InputAdjust::None,
            page_contains_timeout: DEFAULT_WAIT_TIMEOUT,
            element_exists_timeout: DEFAULT_WAIT_TIMEOUT,
            element_displayed_timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Options for [`click_all`](crate::Session::click_all)
#[derive(Clone, Copy, Debug, Default)]
pub struct ClickAllOptions {
    /// Skip elements that are not currently displayed
    pub displayed_only: bool,
    /// Pause after every click, e.g. to let handlers settle
    pub pause_after_each: Duration,
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
