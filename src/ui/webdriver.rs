//! W3C WebDriver client.
//!
//! Speaks the WebDriver HTTP protocol to chromedriver, geckodriver or a
//! Selenium server with `reqwest`. Element lookups poll until the session's
//! element timeout instead of relying on the server's implicit wait, so
//! `is_visible` can stay a single probe.

use super::driver::BrowserDriver;
use super::locator::{Locator, Query};
use crate::config::UiConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::logging::{log_debug, log_info};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

/// Key under which WebDriver returns element references
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

const NO_SUCH_ELEMENT: &str = "no such element";
const STALE_ELEMENT: &str = "stale element reference";

/// An open WebDriver session
#[derive(Debug)]
pub struct WebDriverSession {
    http: reqwest::Client,
    session_url: String,
    element_timeout: Duration,
    poll_interval: Duration,
}

impl WebDriverSession {
    /// Start a browser session with the configured browser and viewport
    ///
    /// # Errors
    ///
    /// - [`HarnessError::RequestFailed`] if the WebDriver server is unreachable
    /// - [`HarnessError::WebDriver`] if it refuses to create the session
    pub async fn start(config: &UiConfig) -> HarnessResult<Self> {
        config.validate()?;
        let http = reqwest::Client::new();
        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": { "browserName": config.browser }
            }
        });

        let url = format!("{}/session", config.webdriver_url);
        let value = send(&http, Method::POST, &url, Some(capabilities)).await?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| HarnessError::response_parsing_error("new session response has no sessionId"))?
            .to_string();

        let session = Self {
            http,
            session_url: format!("{}/session/{session_id}", config.webdriver_url),
            element_timeout: config.element_timeout,
            poll_interval: Duration::from_millis(100),
        };

        session
            .command(Method::POST, "/timeouts", Some(json!({ "implicit": 0 })))
            .await?;
        let (width, height) = config.viewport;
        session
            .command(
                Method::POST,
                "/window/rect",
                Some(json!({ "width": width, "height": height })),
            )
            .await?;

        log_info!(
            session_id = %session_id,
            browser = %config.browser,
            width = width,
            height = height,
            "WebDriver session started"
        );
        Ok(session)
    }

    /// Override how often element lookups are retried while waiting.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    async fn command(&self, method: Method, path: &str, body: Option<Value>) -> HarnessResult<Value> {
        let url = format!("{}{path}", self.session_url);
        send(&self.http, method, &url, body).await
    }

    /// Element references matching `query`, searched from the document or
    /// from inside `parent`.
    async fn find_from(&self, parent: Option<&str>, query: &Query) -> HarnessResult<Vec<String>> {
        let path = match parent {
            Some(id) => format!("/element/{id}/elements"),
            None => "/elements".to_string(),
        };
        let value = self
            .command(
                Method::POST,
                &path,
                Some(json!({ "using": query.strategy.as_str(), "value": query.value })),
            )
            .await?;

        let mut ids: Vec<String> = value
            .as_array()
            .map(|refs| {
                refs.iter()
                    .filter_map(|r| r.get(ELEMENT_KEY).and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if let Some(filter) = &query.text_filter {
            let needle = filter.to_lowercase();
            let mut kept = Vec::new();
            for id in ids {
                if self.element_text(&id).await?.to_lowercase().contains(&needle) {
                    kept.push(id);
                }
            }
            ids = kept;
        }
        Ok(ids)
    }

    /// Every element matched by the full locator chain, in document order.
    async fn find_all(&self, locator: &Locator) -> HarnessResult<Vec<String>> {
        let mut current: Option<Vec<String>> = None;
        for step in locator.steps() {
            let query = step.to_query();
            let next = match &current {
                None => self.find_from(None, &query).await?,
                Some(parents) => {
                    let mut found = Vec::new();
                    for parent in parents {
                        found.extend(self.find_from(Some(parent), &query).await?);
                    }
                    found
                }
            };
            if next.is_empty() {
                return Ok(next);
            }
            current = Some(next);
        }
        Ok(current.unwrap_or_default())
    }

    /// First match, polling until the element timeout.
    async fn resolve(&self, locator: &Locator) -> HarnessResult<String> {
        let started = Instant::now();
        loop {
            match self.find_all(locator).await {
                Ok(ids) => {
                    if let Some(id) = ids.into_iter().next() {
                        return Ok(id);
                    }
                }
                Err(e) if is_stale(&e) => {}
                Err(e) => return Err(e),
            }
            if started.elapsed() >= self.element_timeout {
                return Err(HarnessError::element_not_found(locator.to_string()));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn element_text(&self, id: &str) -> HarnessResult<String> {
        let value = self
            .command(Method::GET, &format!("/element/{id}/text"), None)
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn displayed(&self, id: &str) -> HarnessResult<bool> {
        let value = self
            .command(Method::GET, &format!("/element/{id}/displayed"), None)
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Whether any match of `locator` is displayed, probing once.
    async fn any_displayed(&self, locator: &Locator) -> HarnessResult<bool> {
        for id in self.find_all(locator).await? {
            if self.displayed(&id).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[async_trait]
impl BrowserDriver for WebDriverSession {
    async fn goto(&self, url: &str) -> HarnessResult<()> {
        log_debug!(url = %url, "Navigating");
        self.command(Method::POST, "/url", Some(json!({ "url": url })))
            .await
            .map(|_| ())
    }

    async fn title(&self) -> HarnessResult<String> {
        let value = self.command(Method::GET, "/title", None).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn click(&self, locator: &Locator) -> HarnessResult<()> {
        let id = self.resolve(locator).await?;
        log_debug!(locator = %locator, "Clicking");
        self.command(Method::POST, &format!("/element/{id}/click"), Some(json!({})))
            .await
            .map(|_| ())
    }

    async fn fill(&self, locator: &Locator, text: &str) -> HarnessResult<()> {
        let id = self.resolve(locator).await?;
        log_debug!(locator = %locator, text = %text, "Filling");
        self.command(Method::POST, &format!("/element/{id}/clear"), Some(json!({})))
            .await?;
        self.command(
            Method::POST,
            &format!("/element/{id}/value"),
            Some(json!({ "text": text })),
        )
        .await
        .map(|_| ())
    }

    async fn text(&self, locator: &Locator) -> HarnessResult<String> {
        let id = self.resolve(locator).await?;
        self.element_text(&id).await
    }

    async fn is_visible(&self, locator: &Locator) -> HarnessResult<bool> {
        match self.any_displayed(locator).await {
            Err(e) if is_stale(&e) => Ok(false),
            other => other,
        }
    }

    async fn wait_visible(&self, locator: &Locator, timeout: Duration) -> HarnessResult<()> {
        let started = Instant::now();
        loop {
            if self.is_visible(locator).await? {
                return Ok(());
            }
            if started.elapsed() >= timeout {
                return Err(HarnessError::timeout(
                    format!("{locator} to be visible"),
                    timeout.as_millis() as u64,
                ));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn close(&self) -> HarnessResult<()> {
        self.command(Method::DELETE, "", None).await?;
        log_info!(session = %self.session_url, "WebDriver session closed");
        Ok(())
    }
}

fn is_stale(error: &HarnessError) -> bool {
    matches!(error, HarnessError::WebDriver { error, .. } if error == STALE_ELEMENT)
}

/// Send one WebDriver command and unwrap its `value`.
async fn send(
    http: &reqwest::Client,
    method: Method,
    url: &str,
    body: Option<Value>,
) -> HarnessResult<Value> {
    let mut request = http.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }
    let response = request.send().await.map_err(|e| {
        HarnessError::request_failed(format!("WebDriver {url}: {e}"), Some(Box::new(e)))
    })?;

    let status = response.status();
    let raw_body = response.text().await.map_err(|e| {
        HarnessError::response_parsing_error(format!("Failed to read WebDriver response: {e}"))
    })?;
    let mut payload: Value = serde_json::from_str(&raw_body).map_err(|e| {
        HarnessError::response_parsing_error(format!("Invalid WebDriver response from {url}: {e}"))
    })?;
    let value = payload.get_mut("value").map(Value::take).unwrap_or(Value::Null);

    if status.is_success() {
        return Ok(value);
    }

    let error = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    if error == NO_SUCH_ELEMENT {
        return Err(HarnessError::element_not_found(message));
    }
    log_debug!(url = %url, status = status.as_u16(), error = %error, "WebDriver command rejected");
    Err(HarnessError::webdriver(error, message))
}
