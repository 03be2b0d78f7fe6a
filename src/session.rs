use std::time::Duration;

use fantoccini::actions::{InputSource, MouseActions, PointerAction, MOUSE_BUTTON_LEFT};
use fantoccini::elements::Element;
use fantoccini::key::Key;
use fantoccini::wd::WindowHandle;
use fantoccini::{Client, ClientBuilder, Locator};
use rand::Rng;
use serde_json::json;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use crate::capability::{
    wait_for_target, wait_for_target_displayed, wait_for_target_ready, wait_for_text,
    TargetLocator, TextSnapshotSource,
};
use crate::errors::{Error, Result};
use crate::options::{ClickAllOptions, ClickMethod, InputAdjust, InputMethod, ScrollBehaviour, SessionConfig};
use crate::script;
use crate::wait::{wait_until, TransientFault};

/// Pause bounds after each character in human-like input, milliseconds.
const HUMANLIKE_MIN_PAUSE_MS: u64 = 50;
const HUMANLIKE_MAX_PAUSE_MS: u64 = 150;

/// Attribute used to tag the element found by the element-above hit test so
/// it can be re-found through the driver.
const ABOVE_MARKER_ATTR: &str = "data-fantoccini-extra-probe";

/// Budget for the new window handle to show up after `window.open`.
const TAB_OPEN_TIMEOUT: Duration = Duration::from_secs(1);
const TAB_OPEN_INTERVAL: Duration = Duration::from_millis(100);

/// A WebDriver session with convenience operations layered on top.
///
/// Wraps a connected [`fantoccini::Client`] together with an immutable
/// [`SessionConfig`] supplying the default strategies and wait budgets. The
/// underlying client stays accessible through [`Session::client`] for
/// anything this crate does not cover.
pub struct Session {
    client: Client,
    config: SessionConfig,
}

impl Session {
    /// Wrap an already-connected client.
    pub fn attach(client: Client, config: SessionConfig) -> Self {
        Self { client, config }
    }

    /// Connect to a WebDriver endpoint and wrap the resulting client.
    ///
    /// Probes the endpoint's `/status` route first so an unreachable or
    /// non-WebDriver URL fails with a useful error instead of a session
    /// handshake failure.
    pub async fn connect(webdriver_url: &str, config: SessionConfig) -> Result<Self> {
        let base = Url::parse(webdriver_url).map_err(|e| Error::Connect {
            url: webdriver_url.to_string(),
            reason: e.to_string(),
        })?;

        let status_url = format!("{}/status", base.as_str().trim_end_matches('/'));
        match reqwest::get(&status_url).await {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                return Err(Error::Connect {
                    url: webdriver_url.to_string(),
                    reason: format!("status endpoint returned {}", response.status()),
                });
            }
            Err(e) => {
                return Err(Error::Connect {
                    url: webdriver_url.to_string(),
                    reason: e.to_string(),
                });
            }
        }

        info!("Connecting to WebDriver at {}", webdriver_url);
        let client = ClientBuilder::rustls().connect(webdriver_url).await?;
        Ok(Self::attach(client, config))
    }

    /// The underlying driver client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Find the `index`-th element matching `selector`, erroring when fewer
    /// elements match.
    async fn element_at(&self, selector: &str, index: usize) -> Result<Element> {
        let mut elements = self.client.find_all(Locator::Css(selector)).await?;
        if index >= elements.len() {
            return Err(Error::ElementIndex {
                selector: selector.to_string(),
                index,
                found: elements.len(),
            });
        }
        Ok(elements.swap_remove(index))
    }

    /// Execute JavaScript in the page and return its result.
    pub async fn execute_script(&self, script: &str, args: Vec<serde_json::Value>) -> Result<serde_json::Value> {
        Ok(self.client.execute(script, args).await?)
    }

    /// Dispatch a synthetic DOM event (e.g. `click`, `mouseover`, `change`)
    /// on an element. Reaches handlers that ignore untrusted driver input or
    /// sit on elements WebDriver refuses to click.
    pub async fn simulate_event(&self, element: &Element, event: &str) -> Result<()> {
        debug!("Dispatching synthetic '{}' event", event);
        self.client
            .execute(script::SIMULATE_EVENT, vec![serde_json::to_value(element)?, json!(event)])
            .await?;
        Ok(())
    }

    pub async fn simulate_event_on(&self, selector: &str, index: usize, event: &str) -> Result<()> {
        let element = self.element_at(selector, index).await?;
        self.simulate_event(&element, event).await
    }

    /// Bring an element into view according to `behaviour`.
    pub async fn scroll_to(&self, element: &Element, behaviour: ScrollBehaviour) -> Result<()> {
        match behaviour {
            ScrollBehaviour::None => {}
            ScrollBehaviour::JsScrollIntoView => {
                self.client
                    .execute(script::SCROLL_INTO_VIEW, vec![serde_json::to_value(element)?])
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn scroll_to_selector(&self, selector: &str, index: usize) -> Result<()> {
        let element = self.element_at(selector, index).await?;
        self.scroll_to(&element, self.config.scroll_behaviour).await
    }

    /// Click an element with an explicit strategy, scrolling first.
    pub async fn click_element(
        &self,
        element: &Element,
        method: ClickMethod,
        scroll: ScrollBehaviour,
    ) -> Result<()> {
        self.scroll_to(element, scroll).await?;

        debug!("Clicking element via {:?}", method);
        match method {
            ClickMethod::Standard => {
                // click() gives up the element handle since it may navigate
                element.clone().click().await?;
            }
            ClickMethod::MouseAction => {
                let actions = MouseActions::new("mouse".to_string())
                    .then(PointerAction::MoveToElement {
                        element: element.clone(),
                        duration: None,
                        x: 0,
                        y: 0,
                    })
                    .then(PointerAction::Down {
                        button: MOUSE_BUTTON_LEFT,
                    })
                    .then(PointerAction::Up {
                        button: MOUSE_BUTTON_LEFT,
                    });
                self.client.perform_actions(actions).await?;
            }
            ClickMethod::JsClick => {
                self.client
                    .execute(script::JS_CLICK, vec![serde_json::to_value(element)?])
                    .await?;
            }
            ClickMethod::JsEventSimulation => {
                self.simulate_event(element, "click").await?;
            }
        }
        Ok(())
    }

    /// Click the `index`-th match of `selector` using the session defaults.
    pub async fn click(&self, selector: &str, index: usize) -> Result<()> {
        self.click_with(selector, index, self.config.click_method, self.config.scroll_behaviour)
            .await
    }

    pub async fn click_with(
        &self,
        selector: &str,
        index: usize,
        method: ClickMethod,
        scroll: ScrollBehaviour,
    ) -> Result<()> {
        let element = self.element_at(selector, index).await?;
        self.click_element(&element, method, scroll).await
    }

    /// Click every element matching `selector`, returning how many were
    /// clicked. Hidden elements are skipped when `displayed_only` is set.
    pub async fn click_all(&self, selector: &str, options: ClickAllOptions) -> Result<usize> {
        let elements = self.client.find_all(Locator::Css(selector)).await?;
        info!("Clicking {} elements matching '{}'", elements.len(), selector);

        let mut clicked = 0;
        for element in &elements {
            if options.displayed_only && !element.is_displayed().await? {
                continue;
            }
            self.click_element(element, self.config.click_method, self.config.scroll_behaviour)
                .await?;
            clicked += 1;
            if !options.pause_after_each.is_zero() {
                tokio::time::sleep(options.pause_after_each).await;
            }
        }
        Ok(clicked)
    }

    /// Move the pointer over an element via the Actions API.
    pub async fn hover_element(&self, element: &Element) -> Result<()> {
        let actions = MouseActions::new("mouse".to_string()).then(PointerAction::MoveToElement {
            element: element.clone(),
            duration: None,
            x: 0,
            y: 0,
        });
        self.client.perform_actions(actions).await?;
        Ok(())
    }

    pub async fn hover(&self, selector: &str, index: usize) -> Result<()> {
        let element = self.element_at(selector, index).await?;
        self.hover_element(&element).await
    }

    /// Submit the form enclosing the `index`-th match of `selector`.
    pub async fn submit(&self, selector: &str, index: usize) -> Result<()> {
        let element = self.element_at(selector, index).await?;
        self.client
            .execute(script::SUBMIT_ENCLOSING_FORM, vec![serde_json::to_value(&element)?])
            .await?;
        Ok(())
    }

    /// Send keystrokes to an element with explicit input strategies.
    pub async fn type_text(
        &self,
        element: &Element,
        text: &str,
        method: InputMethod,
        adjust: InputAdjust,
    ) -> Result<()> {
        let mut text = text.to_string();
        match adjust {
            InputAdjust::None => {}
            InputAdjust::ClearFirst => {
                element.clear().await?;
            }
            InputAdjust::TabAfter => {
                text.push(char::from(Key::Tab));
            }
            InputAdjust::ClearFirstTabAfter => {
                element.clear().await?;
                text.push(char::from(Key::Tab));
            }
        }

        debug!("Typing {} characters via {:?}", text.chars().count(), method);
        match method {
            InputMethod::SendKeys => {
                element.send_keys(&text).await?;
            }
            InputMethod::HumanLike => {
                let mut buf = [0u8; 4];
                for ch in text.chars() {
                    element.send_keys(ch.encode_utf8(&mut buf)).await?;
                    let pause =
                        rand::thread_rng().gen_range(HUMANLIKE_MIN_PAUSE_MS..=HUMANLIKE_MAX_PAUSE_MS);
                    tokio::time::sleep(Duration::from_millis(pause)).await;
                }
            }
        }
        Ok(())
    }

    /// Type into the `index`-th match of `selector` using the session defaults.
    pub async fn type_into(&self, selector: &str, index: usize, text: &str) -> Result<()> {
        self.type_into_with(selector, index, text, self.config.input_method, self.config.input_adjust)
            .await
    }

    pub async fn type_into_with(
        &self,
        selector: &str,
        index: usize,
        text: &str,
        method: InputMethod,
        adjust: InputAdjust,
    ) -> Result<()> {
        let element = self.element_at(selector, index).await?;
        self.type_text(&element, text, method, adjust).await
    }

    /// Wait until the page source contains `needle`.
    ///
    /// `None` falls back to the configured `page_contains_timeout`. Returns
    /// `Ok(false)` when the budget runs out, never an error.
    pub async fn wait_for_page_contains(&self, needle: &str, timeout: Option<Duration>) -> Result<bool> {
        let timeout = timeout.unwrap_or(self.config.page_contains_timeout);
        wait_for_text(self, needle, timeout, self.config.poll_interval).await
    }

    /// Wait until the `index`-th match of `selector` exists in the active frame.
    pub async fn wait_for_element(&self, selector: &str, index: usize, timeout: Option<Duration>) -> Result<bool> {
        let timeout = timeout.unwrap_or(self.config.element_exists_timeout);
        wait_for_target(self, selector, index, timeout, self.config.poll_interval).await
    }

    /// Wait until the `index`-th match of `selector` is displayed. The
    /// element is re-located every iteration, so re-rendered nodes do not go
    /// stale mid-wait.
    pub async fn wait_for_element_displayed(
        &self,
        selector: &str,
        index: usize,
        timeout: Option<Duration>,
    ) -> Result<bool> {
        let timeout = timeout.unwrap_or(self.config.element_displayed_timeout);
        wait_for_target_displayed(self, selector, index, timeout, self.config.poll_interval).await
    }

    /// Wait until the element exists, then until it is displayed, within a
    /// single shared budget. `None` defaults to the sum of the configured
    /// existence and visibility budgets.
    pub async fn wait_for_element_ready(
        &self,
        selector: &str,
        index: usize,
        timeout: Option<Duration>,
    ) -> Result<bool> {
        let timeout = timeout
            .unwrap_or(self.config.element_exists_timeout + self.config.element_displayed_timeout);
        wait_for_target_ready(self, selector, index, timeout, self.config.poll_interval).await
    }

    /// Switch the active context to the frame at `index`.
    pub async fn enter_frame(&self, index: u16) -> Result<()> {
        self.client.clone().enter_frame(Some(index)).await?;
        Ok(())
    }

    /// Switch the active context to the frame owned by the `index`-th match
    /// of `selector`.
    pub async fn enter_frame_element(&self, selector: &str, index: usize) -> Result<()> {
        let element = self.element_at(selector, index).await?;
        element.enter_frame().await?;
        Ok(())
    }

    pub async fn enter_parent_frame(&self) -> Result<()> {
        self.client.clone().enter_parent_frame().await?;
        Ok(())
    }

    /// Switch back to the top-level browsing context.
    pub async fn enter_default_frame(&self) -> Result<()> {
        self.client.clone().enter_frame(None).await?;
        Ok(())
    }

    /// All window handles for this session.
    pub async fn tabs(&self) -> Result<Vec<WindowHandle>> {
        Ok(self.client.windows().await?)
    }

    pub async fn switch_to_tab(&self, handle: WindowHandle) -> Result<()> {
        self.client.switch_to_window(handle).await?;
        Ok(())
    }

    /// Open a new tab via `window.open` and return its handle.
    ///
    /// The handle does not appear synchronously in every driver, so the
    /// window list is polled briefly after the script runs.
    pub async fn open_tab(&self) -> Result<WindowHandle> {
        let before = self.client.windows().await?;
        self.client.execute(script::OPEN_BLANK_TAB, vec![]).await?;

        let client = &self.client;
        let before_count = before.len();
        let appeared = wait_until(
            || async move {
                let handles = client.windows().await.map_err(TransientFault::from)?;
                Ok(handles.len() > before_count)
            },
            TAB_OPEN_TIMEOUT,
            TAB_OPEN_INTERVAL,
        )
        .await?;
        if !appeared {
            return Err(Error::TabOpen {
                timeout: TAB_OPEN_TIMEOUT,
            });
        }

        let after = self.client.windows().await?;
        after
            .into_iter()
            .rev()
            .find(|handle| !before.contains(handle))
            .ok_or(Error::TabOpen {
                timeout: TAB_OPEN_TIMEOUT,
            })
    }

    /// Force a hidden element into a displayed state.
    pub async fn make_visible(&self, element: &Element) -> Result<()> {
        self.client
            .execute(script::MAKE_VISIBLE, vec![serde_json::to_value(element)?])
            .await?;
        Ok(())
    }

    pub async fn make_visible_on(&self, selector: &str, index: usize) -> Result<()> {
        let element = self.element_at(selector, index).await?;
        self.make_visible(&element).await
    }

    /// The topmost element at this element's top-left corner, which may be
    /// the element itself or an overlay covering it. `None` when the point
    /// is outside the viewport.
    ///
    /// WebDriver scripts cannot hand back a usable element reference, so the
    /// hit node is tagged with a one-shot attribute marker, re-found by CSS,
    /// and untagged again.
    pub async fn element_above(&self, element: &Element) -> Result<Option<Element>> {
        let marker = Uuid::new_v4().simple().to_string();
        let hit = self
            .client
            .execute(
                script::MARK_ELEMENT_ABOVE,
                vec![
                    serde_json::to_value(element)?,
                    json!(ABOVE_MARKER_ATTR),
                    json!(marker),
                ],
            )
            .await?;
        if !hit.as_bool().unwrap_or(false) {
            return Ok(None);
        }

        let selector = format!("[{ABOVE_MARKER_ATTR}=\"{marker}\"]");
        let above = self.client.find(Locator::Css(&selector)).await?;
        self.client
            .execute(
                script::CLEAR_ATTRIBUTE,
                vec![serde_json::to_value(&above)?, json!(ABOVE_MARKER_ATTR)],
            )
            .await?;
        Ok(Some(above))
    }

    /// HTML source of the current page.
    pub async fn page_source(&self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    pub async fn current_url(&self) -> Result<Url> {
        Ok(self.client.current_url().await?)
    }

    /// End the WebDriver session and close the browser.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

impl TextSnapshotSource for Session {
    async fn text_snapshot(&self) -> Result<String, TransientFault> {
        self.client.source().await.map_err(TransientFault::from)
    }
}

impl TargetLocator for Session {
    type Target = Element;

    async fn locate(&self, selector: &str, index: usize) -> Result<Option<Element>, TransientFault> {
        let mut elements = self.client.find_all(Locator::Css(selector)).await?;
        if index < elements.len() {
            Ok(Some(elements.swap_remove(index)))
        } else {
            Ok(None)
        }
    }

    async fn is_displayed(&self, target: &Element) -> Result<bool, TransientFault> {
        target.is_displayed().await.map_err(TransientFault::from)
    }
}
