//! Order creation group
//!
//! Setup places one order and stores the response; every check reads the
//! stored response and never mutates it.

use crate::api::{CapturedResponse, OrderRequest, OrderResponse};
use crate::checks::{CheckReport, JsonKind};
use crate::error::HarnessResult;
use crate::logging::log_debug;
use crate::session::ApiSession;

/// Fixed values the sandbox returns for the 7-day 1 GB package.
pub mod expected {
    pub const META_MESSAGE: &str = "success";
    pub const CURRENCY: &str = "USD";
    pub const ESIM_TYPE: &str = "Prepaid";
    pub const VALIDITY_DAYS: u64 = 7;
    pub const DATA_AMOUNT: &str = "1 GB";
    pub const MATCHING_ID: &str = "TEST";
    /// Substrings the manual installation HTML must contain
    pub const MANUAL_INSTALLATION_MARKERS: [&str; 2] = ["eSIM name:", "To manually activate"];
}

/// Stored result of one order creation.
#[derive(Debug, Clone)]
pub struct OrderCreationFixture {
    request: OrderRequest,
    response: CapturedResponse,
}

impl OrderCreationFixture {
    /// Get a token from `session` and place `request` once.
    pub async fn setup(session: &ApiSession, request: OrderRequest) -> HarnessResult<Self> {
        let access_token = session.access_token().await?;
        let response = session.client().create_order(&access_token, &request).await?;
        log_debug!(
            status = response.status,
            package_id = %request.package_id,
            "Order creation fixture ready"
        );
        Ok(Self { request, response })
    }

    /// Wrap an already captured response.
    pub fn from_parts(request: OrderRequest, response: CapturedResponse) -> Self {
        Self { request, response }
    }

    pub fn request(&self) -> &OrderRequest {
        &self.request
    }

    pub fn response(&self) -> &CapturedResponse {
        &self.response
    }

    /// Typed view of the stored body.
    pub fn order(&self) -> HarnessResult<OrderResponse> {
        self.response.parse()
    }

    /// 200 OK
    pub fn check_status(&self) -> CheckReport {
        let mut report = CheckReport::new("order creation");
        report.expect_status("order.status", self.response.status, 200);
        if !self.response.is_success() {
            report.fail("order.status", "ok", "true", "false");
        }
        report
    }

    /// `data` and `meta` at the top level
    pub fn check_top_level(&self) -> CheckReport {
        let mut report = CheckReport::new("order creation");
        let body = &self.response.body;
        report.expect_present("order.properties", body, "/data");
        report.expect_present("order.properties", body, "/meta");
        report
    }

    pub fn check_meta(&self) -> CheckReport {
        let mut report = CheckReport::new("order creation");
        report.expect_str(
            "order.meta",
            &self.response.body,
            "/meta/message",
            expected::META_MESSAGE,
        );
        report
    }

    /// Every `data` field against the fixture and the echoed request.
    pub fn check_data(&self) -> CheckReport {
        const CHECK: &str = "order.data";
        let mut report = CheckReport::new("order creation");
        let body = &self.response.body;

        report.expect_str(CHECK, body, "/data/currency", expected::CURRENCY);
        report.expect_str(CHECK, body, "/data/package_id", &self.request.package_id);
        report.expect_u64(CHECK, body, "/data/quantity", u64::from(self.request.quantity));
        report.expect_str(CHECK, body, "/data/description", &self.request.description);
        report.expect_str(CHECK, body, "/data/esim_type", expected::ESIM_TYPE);
        report.expect_u64(CHECK, body, "/data/validity", expected::VALIDITY_DAYS);
        report.expect_str(CHECK, body, "/data/data", expected::DATA_AMOUNT);
        for marker in expected::MANUAL_INSTALLATION_MARKERS {
            report.expect_contains(CHECK, body, "/data/manual_installation", marker);
        }
        report
    }

    /// `sims` has one entry per ordered eSIM, each fully typed.
    pub fn check_sims(&self) -> CheckReport {
        const CHECK: &str = "order.sims";
        let mut report = CheckReport::new("order creation");
        let body = &self.response.body;

        let Some(sims) = report.expect_kind(CHECK, body, "/data/sims", JsonKind::Array) else {
            return report;
        };
        let count = sims.as_array().map_or(0, Vec::len);
        if count != self.request.quantity as usize {
            report.fail(
                CHECK,
                "data.sims.length",
                self.request.quantity.to_string(),
                count.to_string(),
            );
        }
        if count == 0 {
            return report;
        }

        for index in 0..count {
            report.expect_kind(CHECK, body, &format!("/data/sims/{index}/id"), JsonKind::Number);
            report.expect_kind(CHECK, body, &format!("/data/sims/{index}/created_at"), JsonKind::String);
            report.expect_kind(CHECK, body, &format!("/data/sims/{index}/iccid"), JsonKind::String);
            report.expect_str(
                CHECK,
                body,
                &format!("/data/sims/{index}/matching_id"),
                expected::MATCHING_ID,
            );
            report.expect_kind(CHECK, body, &format!("/data/sims/{index}/is_roaming"), JsonKind::Bool);
        }
        report
    }

    /// Every check above in one report.
    pub fn check_all(&self) -> CheckReport {
        let mut report = self.check_status();
        report.merge(self.check_top_level());
        report.merge(self.check_meta());
        report.merge(self.check_data());
        report.merge(self.check_sims());
        report
    }
}
