//! Harness configuration.
//!
//! [`PartnerApiConfig`] covers the partner REST API, [`UiConfig`] the
//! storefront and the WebDriver server driving it. `from_env()` on each is
//! the only place the crate reads environment variables.

use crate::error::{HarnessError, HarnessResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sandbox deployment of the partner API.
pub const DEFAULT_PARTNER_API_BASE_URL: &str = "https://sandbox-partners-api.airalo.com/v2";

/// Public storefront.
pub const DEFAULT_UI_BASE_URL: &str = "https://www.airalo.com";

/// Local chromedriver / selenium standalone.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Environment variable names.
pub mod env {
    pub const ACCESS_TOKEN: &str = "ACCESS_TOKEN";
    pub const CLIENT_ID: &str = "CLIENT_ID";
    pub const CLIENT_SECRET: &str = "CLIENT_SECRET";
    pub const CI: &str = "CI";
    pub const PARTNER_API_BASE_URL: &str = "PARTNER_API_BASE_URL";
    pub const UI_BASE_URL: &str = "UI_BASE_URL";
    pub const WEBDRIVER_URL: &str = "WEBDRIVER_URL";
    pub const BROWSER: &str = "BROWSER";
}

/// Partner API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerApiConfig {
    /// Base URL without trailing slash, e.g. `https://sandbox-partners-api.airalo.com/v2`
    pub base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Pre-seeded bearer token; when set, client credentials are not needed
    pub access_token: Option<String>,
    /// Per-request timeout applied to the underlying HTTP client
    pub request_timeout: Duration,
}

impl Default for PartnerApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PARTNER_API_BASE_URL.to_string(),
            client_id: None,
            client_secret: None,
            access_token: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl PartnerApiConfig {
    /// Configuration pointing at `base_url` with no credentials.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_trailing_slash(base_url.into()),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Credentials are read but not required here; whether they are needed
    /// depends on `ACCESS_TOKEN`, which is decided when a token is first
    /// requested.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ConfigurationError`] if `PARTNER_API_BASE_URL`
    /// is set to something that is not an absolute URL.
    pub fn from_env() -> HarnessResult<Self> {
        let mut config = Self::default();
        if let Some(base_url) = non_empty_var(env::PARTNER_API_BASE_URL) {
            config.base_url = trim_trailing_slash(base_url);
        }
        config.client_id = non_empty_var(env::CLIENT_ID);
        config.client_secret = non_empty_var(env::CLIENT_SECRET);
        config.access_token = non_empty_var(env::ACCESS_TOKEN);

        config.validate()?;

        log_debug!(
            base_url = %config.base_url,
            has_client_id = config.client_id.is_some(),
            has_client_secret = config.client_secret.is_some(),
            has_access_token = config.access_token.is_some(),
            "Partner API configuration loaded from environment"
        );

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ConfigurationError`] if the base URL is empty,
    /// does not parse, or ends with a slash.
    pub fn validate(&self) -> HarnessResult<()> {
        validate_url("partner API base URL", &self.base_url)?;
        if self.base_url.ends_with('/') {
            return Err(HarnessError::configuration_error(format!(
                "partner API base URL must not end with '/': {}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Absolute URL of an endpoint below the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Storefront / browser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub base_url: String,
    pub webdriver_url: String,
    /// Browser name sent in the WebDriver capabilities
    pub browser: String,
    /// `CI=true`: the storefront renders prices in USD instead of the local currency
    pub ci: bool,
    pub viewport: (u32, u32),
    /// How long element lookups and visibility waits may take
    pub element_timeout: Duration,
    /// Pause after dismissing the privacy banner so it is gone before the next click
    pub settle_delay: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UI_BASE_URL.to_string(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            browser: "chrome".to_string(),
            ci: false,
            viewport: (1280, 720),
            element_timeout: Duration::from_secs(10),
            settle_delay: Duration::from_secs(1),
        }
    }
}

impl UiConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ConfigurationError`] if either URL is malformed.
    pub fn from_env() -> HarnessResult<Self> {
        let mut config = Self::default();
        if let Some(base_url) = non_empty_var(env::UI_BASE_URL) {
            config.base_url = trim_trailing_slash(base_url);
        }
        if let Some(webdriver_url) = non_empty_var(env::WEBDRIVER_URL) {
            config.webdriver_url = trim_trailing_slash(webdriver_url);
        }
        if let Some(browser) = non_empty_var(env::BROWSER) {
            config.browser = browser;
        }
        config.ci = std::env::var(env::CI).map(|v| v == "true").unwrap_or(false);

        config.validate()?;

        log_debug!(
            base_url = %config.base_url,
            webdriver_url = %config.webdriver_url,
            browser = %config.browser,
            ci = config.ci,
            "UI configuration loaded from environment"
        );

        Ok(config)
    }

    pub fn validate(&self) -> HarnessResult<()> {
        validate_url("storefront base URL", &self.base_url)?;
        validate_url("WebDriver URL", &self.webdriver_url)?;
        if self.browser.trim().is_empty() {
            return Err(HarnessError::configuration_error("browser name is empty"));
        }
        Ok(())
    }

    /// Absolute storefront URL for a path such as `/`.
    pub fn page_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn trim_trailing_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn validate_url(what: &str, url: &str) -> HarnessResult<()> {
    if url.trim().is_empty() {
        return Err(HarnessError::configuration_error(format!("{what} is empty")));
    }
    reqwest::Url::parse(url)
        .map(|_| ())
        .map_err(|e| HarnessError::configuration_error(format!("{what} is invalid ({url}): {e}")))
}
