//! Storefront UI harness
//!
//! - `locator` - Test id / role / CSS locators compiled to WebDriver queries
//! - `driver` - `BrowserDriver` trait the page object is written against
//! - `webdriver` - W3C WebDriver implementation of `BrowserDriver`
//! - `home_page` - `HomePage` page object
//! - `purchase` - The purchase scenario and its expected package details

pub mod driver;
pub mod home_page;
pub mod locator;
pub mod purchase;
pub mod webdriver;

pub use driver::BrowserDriver;
pub use home_page::{HomePage, PackageDetails, Presence};
pub use locator::Locator;
pub use purchase::{run_purchase_flow, ExpectedPackage, PurchaseOutcome, PurchaseScenario};
pub use webdriver::WebDriverSession;
