//! HTTP client for the partner API
//!
//! A thin layer over `reqwest`: one method per endpoint, no retries. Token
//! requests must succeed; order and listing calls hand back the raw status
//! and JSON body so the response checks can assert on them.

use super::types::{OrderRequest, SimListQuery, TokenData, TokenResponse};
use crate::config::PartnerApiConfig;
use crate::credentials::ClientCredentials;
use crate::error::{HarnessError, HarnessResult};
use crate::logging::{log_debug, log_error, log_info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Instant;

/// Status and parsed JSON body of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedResponse {
    /// Absolute URL that was called, without query string
    pub endpoint: String,
    pub status: u16,
    pub body: Value,
}

impl CapturedResponse {
    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the stored body into a typed response.
    pub fn parse<T: DeserializeOwned>(&self) -> HarnessResult<T> {
        serde_json::from_value(self.body.clone()).map_err(|e| {
            HarnessError::response_parsing_error(format!(
                "{} body does not match {}: {e}",
                self.endpoint,
                std::any::type_name::<T>()
            ))
        })
    }
}

/// Partner API client
#[derive(Debug, Clone)]
pub struct PartnerApiClient {
    client: reqwest::Client,
    config: PartnerApiConfig,
}

impl PartnerApiClient {
    /// Create a client for `config`
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ConfigurationError`] if the configuration
    /// does not validate or the HTTP client cannot be built.
    pub fn new(config: PartnerApiConfig) -> HarnessResult<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| HarnessError::configuration_error(format!("Failed to build HTTP client: {e}")))?;

        log_debug!(
            base_url = %config.base_url,
            request_timeout_ms = config.request_timeout.as_millis() as u64,
            "Partner API client initialized"
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &PartnerApiConfig {
        &self.config
    }

    /// Absolute URL of an endpoint, e.g. `endpoint("sims")`.
    pub fn endpoint(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Build the bearer headers used by authenticated endpoints
    pub fn build_auth_headers(access_token: &str) -> HarnessResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(|e| {
                HarnessError::configuration_error(format!("Invalid access token format: {e}"))
            })?,
        );
        Ok(headers)
    }

    /// Exchange client credentials for a bearer token (`POST /token`).
    ///
    /// # Errors
    ///
    /// - [`HarnessError::RequestFailed`] if the request cannot be sent
    /// - [`HarnessError::AuthenticationFailed`] on 401
    /// - [`HarnessError::UnexpectedStatus`] on any other non-success status
    /// - [`HarnessError::ResponseParsingError`] if `data.access_token` is missing
    pub async fn request_token(&self, credentials: &ClientCredentials) -> HarnessResult<TokenData> {
        let url = self.endpoint("token");
        log_info!(url = %url, client_id = %credentials.client_id, "Requesting access token");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        let raw_body = read_body(&url, response).await?;

        if !status.is_success() {
            if status.as_u16() == 401 {
                return Err(HarnessError::authentication_failed(raw_body));
            }
            return Err(HarnessError::unexpected_status(url, status.as_u16(), raw_body));
        }

        let body = parse_json(&url, &raw_body)?;
        if body.pointer("/data/access_token").is_none() {
            return Err(HarnessError::response_parsing_error(
                "token response has no data.access_token",
            ));
        }
        let token: TokenResponse = serde_json::from_value(body).map_err(|e| {
            HarnessError::response_parsing_error(format!("Invalid token response: {e}"))
        })?;

        log_debug!(
            token_type = %token.data.token_type,
            expires_in = token.data.expires_in,
            meta_message = %token.meta.message,
            "Access token issued"
        );

        Ok(token.data)
    }

    /// Place an order (`POST /orders`) and capture the response.
    pub async fn create_order(
        &self,
        access_token: &str,
        order: &OrderRequest,
    ) -> HarnessResult<CapturedResponse> {
        let url = self.endpoint("orders");
        log_info!(
            url = %url,
            package_id = %order.package_id,
            quantity = order.quantity,
            "Creating order"
        );

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .headers(Self::build_auth_headers(access_token)?)
            .form(&order.form_fields())
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let captured = capture(url, response).await?;
        log_debug!(
            status = captured.status,
            duration_ms = started.elapsed().as_millis() as u64,
            "Order response captured"
        );
        Ok(captured)
    }

    /// List eSIMs (`GET /sims`) and capture the response.
    pub async fn list_sims(
        &self,
        access_token: &str,
        query: &SimListQuery,
    ) -> HarnessResult<CapturedResponse> {
        let url = self.endpoint("sims");
        let pairs = query.query_pairs();
        log_info!(url = %url, filters = pairs.len(), "Listing eSIMs");

        let started = Instant::now();
        let mut request = self
            .client
            .get(&url)
            .headers(Self::build_auth_headers(access_token)?);
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }
        let response = request.send().await.map_err(|e| transport_error(&url, e))?;

        let captured = capture(url, response).await?;
        log_debug!(
            status = captured.status,
            duration_ms = started.elapsed().as_millis() as u64,
            "Listing response captured"
        );
        Ok(captured)
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> HarnessError {
    log_error!(url = %url, error = %e, "HTTP request failed");
    HarnessError::request_failed(format!("{url}: {e}"), Some(Box::new(e)))
}

async fn read_body(url: &str, response: reqwest::Response) -> HarnessResult<String> {
    response.text().await.map_err(|e| {
        log_error!(url = %url, error = %e, "Failed to read response body");
        HarnessError::response_parsing_error(format!("Failed to read response from {url}: {e}"))
    })
}

fn parse_json(url: &str, raw_body: &str) -> HarnessResult<Value> {
    serde_json::from_str(raw_body).map_err(|e| {
        log_error!(url = %url, error = %e, raw_body = %raw_body, "Failed to parse response");
        HarnessError::response_parsing_error(format!("Invalid JSON from {url}: {e}"))
    })
}

/// Store status and body. A failed call whose body is not JSON (a gateway's
/// HTML error page) keeps the raw text, so the status check still reports it.
async fn capture(url: String, response: reqwest::Response) -> HarnessResult<CapturedResponse> {
    let status = response.status();
    let raw_body = read_body(&url, response).await?;
    let body = if status.is_success() {
        parse_json(&url, &raw_body)?
    } else {
        serde_json::from_str(&raw_body).unwrap_or_else(|e| {
            log_debug!(url = %url, status = status.as_u16(), error = %e, "Non-JSON error body stored as text");
            Value::String(raw_body)
        })
    };
    let status = status.as_u16();
    Ok(CapturedResponse {
        endpoint: url,
        status,
        body,
    })
}
