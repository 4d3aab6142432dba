//! Browser automation seam.
//!
//! The page object talks to the browser only through [`BrowserDriver`].
//! [`WebDriverSession`](super::webdriver::WebDriverSession) implements it
//! over the W3C WebDriver protocol; unit tests use a mock.

use super::locator::Locator;
use crate::error::HarnessResult;
use async_trait::async_trait;
use std::time::Duration;

/// Browser operations needed by the storefront page object
///
/// Element operations wait for the element to exist (up to the driver's
/// element timeout) before acting, except [`is_visible`](Self::is_visible),
/// which answers immediately.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Navigate the current tab to an absolute URL
    async fn goto(&self, url: &str) -> HarnessResult<()>;

    /// Title of the current document
    async fn title(&self) -> HarnessResult<String>;

    async fn click(&self, locator: &Locator) -> HarnessResult<()>;

    /// Clear the field, then type `text` into it
    async fn fill(&self, locator: &Locator, text: &str) -> HarnessResult<()>;

    /// Rendered text of the first match
    async fn text(&self, locator: &Locator) -> HarnessResult<String>;

    /// Whether a match exists and is displayed right now
    async fn is_visible(&self, locator: &Locator) -> HarnessResult<bool>;

    /// Wait until a match is displayed
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Timeout`](crate::HarnessError::Timeout) if
    /// nothing visible shows up within `timeout`.
    async fn wait_visible(&self, locator: &Locator, timeout: Duration) -> HarnessResult<()>;

    /// End the browser session
    async fn close(&self) -> HarnessResult<()>;
}
