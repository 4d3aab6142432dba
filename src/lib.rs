//! # esim-partner-e2e
//!
//! End-to-end harness for an eSIM marketplace: the partner REST API and the
//! public storefront.
//!
//! ## Key Features
//!
//! - **Explicit sessions**: [`ApiSession`] caches the bearer token for a run
//!   and is passed into each test group, no global state
//! - **Exhaustive checks**: [`CheckReport`] lists every mismatched field
//!   instead of stopping at the first
//! - **Order and listing groups**: one request per group, many independent
//!   checks over the stored response
//! - **Page object**: [`HomePage`] over any [`BrowserDriver`], with a W3C
//!   WebDriver implementation included
//!
//! ## Example
//!
//! ```rust,no_run
//! use esim_partner_e2e::{ApiSession, OrderCreationFixture, OrderRequest, PartnerApiConfig};
//!
//! # async fn example() -> esim_partner_e2e::HarnessResult<()> {
//! let session = ApiSession::from_config(PartnerApiConfig::from_env()?)?;
//! let order = OrderCreationFixture::setup(&session, OrderRequest::sandbox_default()).await?;
//! order.check_all().into_result()?;
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod api;
pub mod checks;
pub mod config;
pub mod credentials;
pub mod error;
pub mod flows;
pub mod session;
pub mod ui;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use api::{
    CapturedResponse, EsimListResponse, OrderRequest, OrderResponse, PartnerApiClient,
    SimDetails, SimListQuery, TokenResponse,
};
pub use checks::{CheckFailure, CheckReport, JsonKind};
pub use config::{PartnerApiConfig, UiConfig};
pub use credentials::{ClientCredentials, Credentials};
pub use error::{HarnessError, HarnessResult};
pub use flows::{OrderCreationFixture, SimListingFixture};
pub use session::{AccessToken, ApiSession, TokenSource};
pub use ui::{
    run_purchase_flow, BrowserDriver, HomePage, Locator, PackageDetails, Presence,
    PurchaseScenario, WebDriverSession,
};
