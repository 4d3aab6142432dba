//! Drive the storefront to Japan's first 7-day package and check its details.
//!
//! # Running
//!
//! ```bash
//! chromedriver --port=4444 &
//! cargo run --example purchase_japan
//!
//! # expect USD pricing, as CI runners see it
//! CI=true cargo run --example purchase_japan
//! ```

use esim_partner_e2e::{run_purchase_flow, HomePage, PurchaseScenario, UiConfig, WebDriverSession};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = UiConfig::from_env()?;
    let scenario = PurchaseScenario::japan(config.ci);
    println!(
        "Storefront {} via {} ({})",
        config.base_url, config.webdriver_url, config.browser
    );

    let driver = WebDriverSession::start(&config).await?;
    let page = HomePage::new(driver, config);
    let outcome = run_purchase_flow(&page, &scenario).await?;

    println!("Privacy window: {:?}", outcome.privacy_window);
    println!("Push prompt:    {:?}", outcome.push_prompt);
    println!("Title:          {}", outcome.title);
    println!("Operator:       {}", outcome.details.operator);
    println!("Coverage:       {}", outcome.details.coverage);
    println!("Data:           {}", outcome.details.data);
    println!("Validity:       {}", outcome.details.validity);
    println!("Price:          {}", outcome.details.price);

    for failure in outcome.report.failures() {
        println!("FAILED {failure}");
    }
    outcome.report.into_result()?;
    Ok(())
}
