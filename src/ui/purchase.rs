//! Purchase scenario: find a country's first 7-day package and check it.

use super::driver::BrowserDriver;
use super::home_page::{HomePage, PackageDetails, Presence};
use crate::checks::CheckReport;
use crate::error::HarnessResult;
use crate::logging::{log_info, log_warn};

pub const EXPECTED_TITLE: &str = "Buy eSIMs for international travel - Airalo";

/// What the detail panel should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedPackage {
    pub operator: String,
    pub coverage: String,
    pub data: String,
    pub validity: String,
    pub price: String,
}

impl ExpectedPackage {
    /// Moshi Moshi 1 GB / 7 days. CI runners are served USD; local runs see
    /// the price in euros.
    pub fn japan_seven_day(ci: bool) -> Self {
        Self {
            operator: "Moshi Moshi".to_string(),
            coverage: "Japan".to_string(),
            data: "1 GB".to_string(),
            validity: "7 Days".to_string(),
            price: if ci { "$4.50 USD" } else { "4.50 €" }.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseScenario {
    pub country: String,
    pub expected: ExpectedPackage,
}

impl PurchaseScenario {
    pub fn japan(ci: bool) -> Self {
        Self {
            country: "Japan".to_string(),
            expected: ExpectedPackage::japan_seven_day(ci),
        }
    }
}

/// Everything the run observed.
#[derive(Debug, Clone)]
pub struct PurchaseOutcome {
    pub privacy_window: Presence,
    pub push_prompt: Presence,
    pub title: String,
    pub details: PackageDetails,
    /// Title and detail mismatches
    pub report: CheckReport,
}

/// Drive the storefront through `scenario`, then close the browser.
///
/// The browser is closed whether or not the steps succeed; a step error
/// takes precedence over a close error.
pub async fn run_purchase_flow<D: BrowserDriver>(
    page: &HomePage<D>,
    scenario: &PurchaseScenario,
) -> HarnessResult<PurchaseOutcome> {
    let outcome = purchase_steps(page, scenario).await;
    let closed = page.close().await;

    match (outcome, closed) {
        (Ok(outcome), Ok(())) => Ok(outcome),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), closed) => {
            if let Err(close_error) = closed {
                log_warn!(error = %close_error, "Failed to close browser after a failed purchase flow");
            }
            Err(e)
        }
    }
}

async fn purchase_steps<D: BrowserDriver>(
    page: &HomePage<D>,
    scenario: &PurchaseScenario,
) -> HarnessResult<PurchaseOutcome> {
    page.navigate().await?;
    let privacy_window = page.accept_privacy_policy().await?;
    let push_prompt = page.dont_allow_push_notifications().await?;

    let mut report = CheckReport::new(format!("purchase {}", scenario.country));
    let title = page.title().await?;
    report.expect_text("page.title", "title", &title, EXPECTED_TITLE);

    page.search_for_country(&scenario.country).await?;
    page.select_first_esim_package().await?;

    let details = page.package_details().await?;
    let expected = &scenario.expected;
    report.expect_text("package.details", "operator", &details.operator, &expected.operator);
    report.expect_text("package.details", "coverage", &details.coverage, &expected.coverage);
    report.expect_text("package.details", "data", &details.data, &expected.data);
    report.expect_text("package.details", "validity", &details.validity, &expected.validity);
    report.expect_text("package.details", "price", &details.price, &expected.price);

    log_info!(
        country = %scenario.country,
        failures = report.failures().len(),
        "Purchase flow finished"
    );

    Ok(PurchaseOutcome {
        privacy_window,
        push_prompt,
        title,
        details,
        report,
    })
}
