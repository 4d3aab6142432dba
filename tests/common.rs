//! Test helper utilities for the harness integration tests
//!
//! Mock partner API and WebDriver servers built on `wiremock`, plus the
//! sandbox-shaped bodies they answer with.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use esim_partner_e2e::{OrderRequest, PartnerApiConfig, UiConfig};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_CLIENT_ID: &str = "integration-client";
pub const TEST_CLIENT_SECRET: &str = "integration-secret";
pub const TEST_TOKEN: &str = "eyJ0eXAiOiJKV1QiLCJhbGciOiJSUzI1NiJ9.sandbox";

/// Route tracing output through the test harness; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("esim_partner_e2e=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Partner API config pointing at `server`, with client credentials.
pub fn api_config(server: &MockServer) -> PartnerApiConfig {
    PartnerApiConfig {
        client_id: Some(TEST_CLIENT_ID.to_string()),
        client_secret: Some(TEST_CLIENT_SECRET.to_string()),
        ..PartnerApiConfig::with_base_url(format!("{}/v2", server.uri()))
    }
}

/// UI config pointing at a mock WebDriver server with short waits.
pub fn ui_config(webdriver: &MockServer) -> UiConfig {
    UiConfig {
        base_url: "https://store.test".to_string(),
        webdriver_url: webdriver.uri(),
        element_timeout: Duration::from_millis(200),
        settle_delay: Duration::ZERO,
        ..UiConfig::default()
    }
}

pub fn token_body() -> Value {
    json!({
        "data": {
            "token_type": "Bearer",
            "expires_in": 31_622_400,
            "access_token": TEST_TOKEN
        },
        "meta": { "message": "success" }
    })
}

/// Mount `POST /v2/token` answering with a token, expected `calls` times.
pub async fn mount_token(server: &MockServer, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v2/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(calls)
        .mount(server)
        .await;
}

pub fn sim_json(id: u64) -> Value {
    json!({
        "id": id,
        "created_at": "2024-03-01 10:15:00",
        "iccid": format!("89852240810733{id:06}"),
        "matching_id": "TEST",
        "is_roaming": true
    })
}

/// Order body as the sandbox answers `request`.
pub fn order_body(request: &OrderRequest) -> Value {
    let sims: Vec<Value> = (0..request.quantity)
        .map(|i| sim_json(5000 + u64::from(i)))
        .collect();
    json!({
        "data": {
            "currency": "USD",
            "package_id": request.package_id,
            "quantity": request.quantity,
            "description": request.description,
            "esim_type": "Prepaid",
            "validity": 7,
            "data": "1 GB",
            "manual_installation": "<p><b>eSIM name:</b> Kallur Digital</p><p>To manually activate the eSIM on your eSIM capable device:</p>",
            "sims": sims
        },
        "meta": { "message": "success" }
    })
}

/// First page of the listing served at `{base_url}/sims`.
pub fn listing_body(base_url: &str) -> Value {
    json!({
        "data": [sim_json(1), sim_json(2), sim_json(3)],
        "links": {
            "first": format!("{base_url}/sims?page=1"),
            "last": format!("{base_url}/sims?page=4"),
            "prev": null,
            "next": format!("{base_url}/sims?page=2")
        },
        "meta": {
            "message": "success",
            "current_page": 1,
            "path": format!("{base_url}/sims"),
            "per_page": "25",
            "total": 88
        }
    })
}

// ============================================================================
// WebDriver
// ============================================================================

pub const SESSION_ID: &str = "3f1c9a0e";
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

pub fn session_path(suffix: &str) -> String {
    format!("/session/{SESSION_ID}{suffix}")
}

pub fn value(v: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "value": v }))
}

pub fn element_refs(ids: &[&str]) -> ResponseTemplate {
    let refs: Vec<Value> = ids.iter().map(|id| json!({ ELEMENT_KEY: id })).collect();
    value(Value::Array(refs))
}

pub fn webdriver_error(status: u16, error: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "value": { "error": error, "message": message, "stacktrace": "" }
    }))
}

/// Mount the new-session handshake: session, timeouts and window size.
pub async fn mount_new_session(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(value(json!({
            "sessionId": SESSION_ID,
            "capabilities": { "browserName": "chrome" }
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_path("/timeouts")))
        .respond_with(value(Value::Null))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_path("/window/rect")))
        .respond_with(value(json!({ "x": 0, "y": 0, "width": 1280, "height": 720 })))
        .mount(server)
        .await;
}
