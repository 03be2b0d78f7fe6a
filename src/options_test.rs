// Unit tests for strategy enums and session configuration

use super::*;

use std::time::Duration;

use pretty_assertions::assert_eq;

#[test]
fn config_defaults_match_the_conventional_values() {
    let config = SessionConfig::default();

    assert_eq!(config.click_method, ClickMethod::Standard);
    assert_eq!(config.scroll_behaviour, ScrollBehaviour::None);
    assert_eq!(config.input_method, InputMethod::SendKeys);
    assert_eq!(config.input_adjust, InputAdjust::None);
    assert_eq!(config.page_contains_timeout, Duration::from_secs(30));
    assert_eq!(config.element_exists_timeout, Duration::from_secs(30));
    assert_eq!(config.element_displayed_timeout, Duration::from_secs(30));
    assert_eq!(config.poll_interval, Duration::from_millis(250));
}

#[test]
fn enums_serialize_as_snake_case() {
    // Field names in serialized configs are a compatibility surface
    assert_eq!(
        serde_json::to_string(&ClickMethod::JsEventSimulation).unwrap(),
        "\"js_event_simulation\""
    );
    assert_eq!(
        serde_json::to_string(&InputAdjust::ClearFirstTabAfter).unwrap(),
        "\"clear_first_tab_after\""
    );
}

#[test]
fn partial_config_fills_in_defaults() {
    let config: SessionConfig = serde_json::from_str(r#"{"click_method": "js_click"}"#).unwrap();

    assert_eq!(config.click_method, ClickMethod::JsClick);
    assert_eq!(config.input_method, InputMethod::SendKeys);
    assert_eq!(config.poll_interval, Duration::from_millis(250));
}
