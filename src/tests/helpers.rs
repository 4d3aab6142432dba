//! Test helper utilities
//!
//! Sandbox-shaped response bodies and configurations shared by the unit
//! tests. Test-only; never used from library code.

use crate::api::{CapturedResponse, OrderRequest};
use crate::config::{PartnerApiConfig, UiConfig};
use serde_json::{json, Value};
use std::time::Duration;

pub const TEST_BASE_URL: &str = "https://sandbox.test/v2";

pub fn create_test_api_config() -> PartnerApiConfig {
    PartnerApiConfig {
        client_id: Some("test-client-id".to_string()),
        client_secret: Some("test-client-secret".to_string()),
        ..PartnerApiConfig::with_base_url(TEST_BASE_URL)
    }
}

/// UI config with no settle delay and short waits
pub fn create_test_ui_config(ci: bool) -> UiConfig {
    UiConfig {
        base_url: "https://store.test".to_string(),
        ci,
        element_timeout: Duration::from_millis(50),
        settle_delay: Duration::ZERO,
        ..UiConfig::default()
    }
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

/// Order body exactly as the sandbox answers `request`.
pub fn order_body(request: &OrderRequest) -> Value {
    let sims: Vec<Value> = (0..request.quantity).map(|i| sim_json(1000 + u64::from(i))).collect();
    json!({
        "data": {
            "currency": "USD",
            "package_id": request.package_id,
            "quantity": request.quantity,
            "description": request.description,
            "esim_type": "Prepaid",
            "validity": 7,
            "data": "1 GB",
            "price": 4.5,
            "manual_installation": "<p><b>eSIM name:</b> Kallur Digital</p><p>To manually activate the eSIM on your eSIM capable device:</p>",
            "sims": sims
        },
        "meta": { "message": "success" }
    })
}

pub fn captured_order(request: &OrderRequest) -> CapturedResponse {
    CapturedResponse {
        endpoint: format!("{TEST_BASE_URL}/orders"),
        status: 200,
        body: order_body(request),
    }
}

/// First page of a three-page listing.
pub fn listing_body(base_url: &str) -> Value {
    json!({
        "data": [sim_json(1), sim_json(2)],
        "links": {
            "first": format!("{base_url}/sims?page=1"),
            "last": format!("{base_url}/sims?page=3"),
            "prev": null,
            "next": format!("{base_url}/sims?page=2")
        },
        "meta": {
            "message": "success",
            "current_page": 1,
            "from": 1,
            "last_page": 3,
            "path": format!("{base_url}/sims"),
            "per_page": "25",
            "to": 25,
            "total": 61
        }
    })
}

pub fn captured_listing() -> CapturedResponse {
    CapturedResponse {
        endpoint: format!("{TEST_BASE_URL}/sims"),
        status: 200,
        body: listing_body(TEST_BASE_URL),
    }
}
