//! Run the order creation and listing groups against the partner sandbox.
//!
//! This example shows how to:
//! - Load the partner API configuration from the environment
//! - Share one authenticated session between both groups
//! - Print every failed check instead of stopping at the first
//!
//! # Running
//!
//! ```bash
//! export CLIENT_ID="..."
//! export CLIENT_SECRET="..."
//! # or skip the token request with a token you already have:
//! # export ACCESS_TOKEN="..."
//! RUST_LOG=esim_partner_e2e=debug cargo run --example sandbox_order
//! ```

use esim_partner_e2e::{
    ApiSession, CheckReport, OrderCreationFixture, OrderRequest, PartnerApiConfig, SimListQuery,
    SimListingFixture,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn print_report(report: &CheckReport) {
    if report.is_success() {
        println!("{}: all checks passed", report.group());
        return;
    }
    println!("{}: {} check(s) failed", report.group(), report.failures().len());
    for failure in report.failures() {
        println!("  {failure}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PartnerApiConfig::from_env()?;
    println!("Partner API: {}", config.base_url);
    let session = Arc::new(ApiSession::from_config(config)?);

    // Both groups start together; the session makes a single token request
    let (order, listing) = tokio::join!(
        OrderCreationFixture::setup(&session, OrderRequest::sandbox_default()),
        SimListingFixture::setup(&session, SimListQuery::default())
    );
    let order = order?;
    let listing = listing?;

    if let Some(token) = session.cached_token().await {
        println!("Token source: {:?}, expires at: {:?}", token.source, token.expires_at());
    }

    let order_report = order.check_all();
    let listing_report = listing.check_all();
    print_report(&order_report);
    print_report(&listing_report);

    if let Ok(parsed) = order.order() {
        println!("\nOrdered {} eSIM(s):", parsed.data.sims.len());
        for sim in &parsed.data.sims {
            println!("  {} (id {})", sim.iccid, sim.id);
        }
    }

    order_report.into_result()?;
    listing_report.into_result()?;
    Ok(())
}
