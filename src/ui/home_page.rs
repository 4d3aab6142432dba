//! Storefront home page object.

use super::driver::BrowserDriver;
use super::locator::Locator;
use crate::config::UiConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::logging::{log_debug, log_info};

/// Whether an optional element was there to interact with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
}

/// Package details as rendered on the sim detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDetails {
    pub operator: String,
    pub coverage: String,
    pub data: String,
    pub validity: String,
    pub price: String,
}

/// Locators and interactions for the storefront home page
pub struct HomePage<D: BrowserDriver> {
    driver: D,
    config: UiConfig,
    pub privacy_window: Locator,
    pub privacy_accept_button: Locator,
    pub dont_allow_button: Locator,
    pub search_input: Locator,
    pub first_esim_package: Locator,
    pub operator_title: Locator,
    pub coverage_value: Locator,
    pub data_value: Locator,
    pub validity_value: Locator,
    pub price_value: Locator,
}

fn info_list_value(test_id: &str) -> Locator {
    Locator::test_id("sim-detail-info-list").locate(Locator::test_id(test_id))
}

impl<D: BrowserDriver> HomePage<D> {
    pub fn new(driver: D, config: UiConfig) -> Self {
        Self {
            driver,
            config,
            privacy_window: Locator::css("#onetrust-group-container"),
            privacy_accept_button: Locator::role_named("button", "ACCEPT"),
            dont_allow_button: Locator::role_named("button", "DON'T ALLOW"),
            search_input: Locator::test_id("search-input"),
            first_esim_package: Locator::role_named("link", "VALIDITY 7 Days")
                .locate(Locator::role_named("button", "BUY NOW")),
            operator_title: Locator::test_id("sim-detail-operator-title"),
            coverage_value: info_list_value("COVERAGE-value"),
            data_value: info_list_value("DATA-value"),
            validity_value: info_list_value("VALIDITY-value"),
            price_value: info_list_value("PRICE-value"),
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Open the storefront landing page.
    pub async fn navigate(&self) -> HarnessResult<()> {
        self.driver.goto(&self.config.page_url("/")).await
    }

    /// Accept the privacy policy if its window shows up.
    ///
    /// A window that never appears, or an accept button that is gone, is
    /// reported as [`Presence::Absent`]. Other failures propagate.
    pub async fn accept_privacy_policy(&self) -> HarnessResult<Presence> {
        let accepted = async {
            self.driver
                .wait_visible(&self.privacy_window, self.config.element_timeout)
                .await?;
            self.driver.click(&self.privacy_accept_button).await
        }
        .await;

        match accepted {
            Ok(()) => {
                // banner fades out; clicks under it are swallowed until then
                tokio::time::sleep(self.config.settle_delay).await;
                log_debug!("Privacy policy accepted");
                Ok(Presence::Present)
            }
            Err(e) if e.is_absence() => {
                log_info!(reason = %e, "Privacy window not found or already accepted");
                Ok(Presence::Absent)
            }
            Err(e) => Err(e),
        }
    }

    /// Decline push notifications if the prompt is showing.
    pub async fn dont_allow_push_notifications(&self) -> HarnessResult<Presence> {
        if self.driver.is_visible(&self.dont_allow_button).await? {
            self.driver.click(&self.dont_allow_button).await?;
            log_debug!("Push notifications declined");
            Ok(Presence::Present)
        } else {
            log_info!("Push notifications dont allow button is not visible. Proceeding with other tests.");
            Ok(Presence::Absent)
        }
    }

    /// Type `country` into the search box and pick it from the suggestions.
    ///
    /// # Errors
    ///
    /// Any failure is returned as [`HarnessError::CountryNotFound`] with the
    /// cause attached.
    pub async fn search_for_country(&self, country: &str) -> HarnessResult<()> {
        let selected = async {
            self.driver.fill(&self.search_input, country).await?;
            self.driver
                .click(&Locator::role("listitem").filter_text(country))
                .await
        }
        .await;

        selected.map_err(|e| HarnessError::country_not_found(country, e))
    }

    /// Open the first 7-day package.
    pub async fn select_first_esim_package(&self) -> HarnessResult<()> {
        self.driver.click(&self.first_esim_package).await
    }

    /// Read the detail panel of the selected package.
    pub async fn package_details(&self) -> HarnessResult<PackageDetails> {
        Ok(PackageDetails {
            operator: self.driver.text(&self.operator_title).await?,
            coverage: self.driver.text(&self.coverage_value).await?,
            data: self.driver.text(&self.data_value).await?,
            validity: self.driver.text(&self.validity_value).await?,
            price: self.driver.text(&self.price_value).await?,
        })
    }

    pub async fn title(&self) -> HarnessResult<String> {
        self.driver.title().await
    }

    /// End the browser session.
    pub async fn close(&self) -> HarnessResult<()> {
        self.driver.close().await
    }
}
