//! eSIM listing group
//!
//! Setup fetches one page of `/sims` and stores it; checks read only the
//! stored page.

use crate::api::{CapturedResponse, EsimListResponse, SimListQuery};
use crate::checks::{field_name, CheckReport, JsonKind};
use crate::error::HarnessResult;
use crate::logging::log_debug;
use crate::session::ApiSession;
use once_cell::sync::Lazy;
use regex::Regex;

pub mod expected {
    pub const META_MESSAGE: &str = "success";
    pub const CURRENT_PAGE: u64 = 1;
    /// The API reports the page size as a string
    pub const PER_PAGE: &str = "25";
}

static PAGE_PARAM: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"[?&]page=(\d+)").ok());

/// Page number carried in a pagination link, if any.
pub fn page_number(link: &str) -> Option<u32> {
    PAGE_PARAM
        .as_ref()?
        .captures(link)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Stored result of one listing call.
#[derive(Debug, Clone)]
pub struct SimListingFixture {
    /// Listing endpoint, `{base}/sims`
    sims_url: String,
    response: CapturedResponse,
}

impl SimListingFixture {
    /// Get a token from `session` and fetch one page.
    pub async fn setup(session: &ApiSession, query: SimListQuery) -> HarnessResult<Self> {
        let access_token = session.access_token().await?;
        let response = session.client().list_sims(&access_token, &query).await?;
        log_debug!(status = response.status, "Sim listing fixture ready");
        Ok(Self {
            sims_url: session.client().endpoint("sims"),
            response,
        })
    }

    pub fn from_parts(sims_url: impl Into<String>, response: CapturedResponse) -> Self {
        Self {
            sims_url: sims_url.into(),
            response,
        }
    }

    pub fn response(&self) -> &CapturedResponse {
        &self.response
    }

    /// Typed view of the stored page.
    pub fn page(&self) -> HarnessResult<EsimListResponse> {
        self.response.parse()
    }

    pub fn check_status(&self) -> CheckReport {
        let mut report = CheckReport::new("sim listing");
        report.expect_status("sims.status", self.response.status, 200);
        if !self.response.is_success() {
            report.fail("sims.status", "ok", "true", "false");
        }
        report
    }

    pub fn check_top_level(&self) -> CheckReport {
        let mut report = CheckReport::new("sim listing");
        let body = &self.response.body;
        for key in ["/data", "/links", "/meta"] {
            report.expect_present("sims.properties", body, key);
        }
        report
    }

    /// Every listed sim carries correctly typed fields.
    pub fn check_sim_details(&self) -> CheckReport {
        const CHECK: &str = "sims.data";
        let mut report = CheckReport::new("sim listing");
        let body = &self.response.body;

        let Some(data) = report.expect_kind(CHECK, body, "/data", JsonKind::Array) else {
            return report;
        };
        let count = data.as_array().map_or(0, Vec::len);
        if count == 0 {
            report.fail(CHECK, "data.length", "greater than 0", "0");
        }
        for index in 0..count {
            report.expect_kind(CHECK, body, &format!("/data/{index}/id"), JsonKind::Number);
            report.expect_kind(CHECK, body, &format!("/data/{index}/created_at"), JsonKind::String);
            report.expect_kind(CHECK, body, &format!("/data/{index}/iccid"), JsonKind::String);
            report.expect_kind(CHECK, body, &format!("/data/{index}/matching_id"), JsonKind::String);
            report.expect_kind(CHECK, body, &format!("/data/{index}/is_roaming"), JsonKind::Bool);
        }
        report
    }

    /// Pagination links are URLs pointing at the expected pages.
    pub fn check_links(&self) -> CheckReport {
        const CHECK: &str = "sims.links";
        let mut report = CheckReport::new("sim listing");
        let body = &self.response.body;
        let page_prefix = format!("{}?page=", self.sims_url);

        for (pointer, marker) in [
            ("/links/first", format!("{page_prefix}1")),
            ("/links/last", page_prefix.clone()),
            ("/links/next", format!("{page_prefix}2")),
        ] {
            let Some(link) = report
                .expect_kind(CHECK, body, pointer, JsonKind::String)
                .and_then(|v| v.as_str())
            else {
                continue;
            };
            if let Err(e) = reqwest::Url::parse(link) {
                report.fail(CHECK, field_name(pointer), "a valid URL", format!("{link:?} ({e})"));
                continue;
            }
            report.expect_contains(CHECK, body, pointer, &marker);
        }

        if let Some(last) = body.pointer("/links/last").and_then(|v| v.as_str()) {
            if page_number(last).is_none() {
                report.fail(CHECK, "links.last", "a page number", format!("{last:?}"));
            }
        }
        report
    }

    pub fn check_meta(&self) -> CheckReport {
        const CHECK: &str = "sims.meta";
        let mut report = CheckReport::new("sim listing");
        let body = &self.response.body;

        report.expect_str(CHECK, body, "/meta/message", expected::META_MESSAGE);
        report.expect_u64(CHECK, body, "/meta/current_page", expected::CURRENT_PAGE);
        report.expect_str(CHECK, body, "/meta/path", &self.sims_url);
        report.expect_str(CHECK, body, "/meta/per_page", expected::PER_PAGE);
        report.expect_kind(CHECK, body, "/meta/total", JsonKind::Number);
        report
    }

    pub fn check_all(&self) -> CheckReport {
        let mut report = self.check_status();
        report.merge(self.check_top_level());
        report.merge(self.check_sim_details());
        report.merge(self.check_links());
        report.merge(self.check_meta());
        report
    }
}
