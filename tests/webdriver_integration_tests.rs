//! Integration Tests for the WebDriver Client
//!
//! UNIT UNDER TEST: WebDriverSession
//!
//! BUSINESS RESPONSIBILITY:
//!   - Open a browser session with the configured capabilities and viewport
//!   - Resolve chained locators through element-scoped searches
//!   - Wait for elements up to the configured timeout
//!   - Map WebDriver error payloads to harness errors
//!
//! TEST COVERAGE:
//!   - Session handshake and teardown
//!   - Click, fill, text and title commands
//!   - Chained and text-filtered lookups
//!   - Missing elements, visibility timeouts and rejected commands

mod common;

use common::{
    element_refs, mount_new_session, session_path, ui_config, value, webdriver_error,
};
use esim_partner_e2e::{BrowserDriver, HarnessError, Locator, WebDriverSession};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer};

async fn start_session(server: &MockServer) -> WebDriverSession {
    mount_new_session(server).await;
    WebDriverSession::start(&ui_config(server))
        .await
        .unwrap()
        .with_poll_interval(Duration::from_millis(20))
}

#[tokio::test]
async fn test_start_sends_capabilities_and_viewport() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session"))
        .and(body_partial_json(json!({
            "capabilities": { "alwaysMatch": { "browserName": "chrome" } }
        })))
        .respond_with(value(json!({ "sessionId": common::SESSION_ID, "capabilities": {} })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_path("/timeouts")))
        .and(body_partial_json(json!({ "implicit": 0 })))
        .respond_with(value(json!(null)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_path("/window/rect")))
        .and(body_partial_json(json!({ "width": 1280, "height": 720 })))
        .respond_with(value(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let result = WebDriverSession::start(&ui_config(&server)).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_session_refused_is_webdriver_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(webdriver_error(
            500,
            "session not created",
            "This version of ChromeDriver only supports Chrome version 120",
        ))
        .mount(&server)
        .await;

    let error = WebDriverSession::start(&ui_config(&server)).await.unwrap_err();

    match error {
        HarnessError::WebDriver { error, message } => {
            assert_eq!(error, "session not created");
            assert!(message.contains("ChromeDriver"));
        }
        other => panic!("expected webdriver error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_goto_title_and_close() {
    let server = MockServer::start().await;
    let driver = start_session(&server).await;
    Mock::given(method("POST"))
        .and(path(session_path("/url")))
        .and(body_partial_json(json!({ "url": "https://store.test/" })))
        .respond_with(value(json!(null)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_path("/title")))
        .respond_with(value(json!("Buy eSIMs for international travel - Airalo")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(session_path("")))
        .respond_with(value(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    driver.goto("https://store.test/").await.unwrap();
    let title = driver.title().await.unwrap();
    driver.close().await.unwrap();

    assert_eq!(title, "Buy eSIMs for international travel - Airalo");
}

#[tokio::test]
async fn test_fill_clears_then_types() {
    let server = MockServer::start().await;
    let driver = start_session(&server).await;
    Mock::given(method("POST"))
        .and(path(session_path("/elements")))
        .and(body_partial_json(json!({
            "using": "css selector",
            "value": "[data-testid=\"search-input\"]"
        })))
        .respond_with(element_refs(&["input-1"]))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_path("/element/input-1/clear")))
        .respond_with(value(json!(null)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_path("/element/input-1/value")))
        .and(body_partial_json(json!({ "text": "Japan" })))
        .respond_with(value(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    driver
        .fill(&Locator::test_id("search-input"), "Japan")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_chained_locator_searches_inside_parent() {
    // The BUY NOW button is looked up inside the 7-day package link

    let server = MockServer::start().await;
    let driver = start_session(&server).await;
    Mock::given(method("POST"))
        .and(path(session_path("/elements")))
        .and(body_partial_json(json!({ "using": "xpath" })))
        .respond_with(element_refs(&["package-link"]))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_path("/element/package-link/elements")))
        .respond_with(element_refs(&["buy-now"]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_path("/element/buy-now/click")))
        .respond_with(value(json!(null)))
        .expect(1)
        .mount(&server)
        .await;
    let locator = Locator::role_named("link", "VALIDITY 7 Days")
        .locate(Locator::role_named("button", "BUY NOW"));

    driver.click(&locator).await.unwrap();
}

#[tokio::test]
async fn test_css_text_filter_picks_matching_element() {
    let server = MockServer::start().await;
    let driver = start_session(&server).await;
    Mock::given(method("POST"))
        .and(path(session_path("/elements")))
        .respond_with(element_refs(&["li-france", "li-japan"]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_path("/element/li-france/text")))
        .respond_with(value(json!("France")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_path("/element/li-japan/text")))
        .respond_with(value(json!("Japan\n38 packages")))
        .mount(&server)
        .await;

    let text = driver
        .text(&Locator::css("ul.countries li").filter_text("japan"))
        .await
        .unwrap();

    assert!(text.starts_with("Japan"));
}

#[tokio::test]
async fn test_missing_element_times_out_as_not_found() {
    let server = MockServer::start().await;
    let driver = start_session(&server).await;
    Mock::given(method("POST"))
        .and(path(session_path("/elements")))
        .respond_with(element_refs(&[]))
        .mount(&server)
        .await;

    let error = driver
        .click(&Locator::test_id("sim-detail-operator-title"))
        .await
        .unwrap_err();

    assert!(error.is_absence());
    assert!(error.to_string().contains("sim-detail-operator-title"));
}

#[tokio::test]
async fn test_visibility_probe_and_wait() {
    let server = MockServer::start().await;
    let driver = start_session(&server).await;
    Mock::given(method("POST"))
        .and(path(session_path("/elements")))
        .respond_with(element_refs(&["banner"]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_path("/element/banner/displayed")))
        .respond_with(value(json!(false)))
        .mount(&server)
        .await;
    let banner = Locator::css("#onetrust-group-container");

    let visible = driver.is_visible(&banner).await.unwrap();
    let waited = driver
        .wait_visible(&banner, Duration::from_millis(60))
        .await
        .unwrap_err();

    assert!(!visible);
    assert!(matches!(waited, HarnessError::Timeout { timeout_ms: 60, .. }));
}

#[tokio::test]
async fn test_rejected_click_is_not_absence() {
    let server = MockServer::start().await;
    let driver = start_session(&server).await;
    Mock::given(method("POST"))
        .and(path(session_path("/elements")))
        .respond_with(element_refs(&["accept"]))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_path("/element/accept/click")))
        .respond_with(webdriver_error(
            400,
            "element click intercepted",
            "Other element would receive the click",
        ))
        .mount(&server)
        .await;

    let error = driver
        .click(&Locator::role_named("button", "ACCEPT"))
        .await
        .unwrap_err();

    assert!(!error.is_absence());
    assert!(matches!(error, HarnessError::WebDriver { .. }));
}
