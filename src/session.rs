//! Authenticated session against the partner API.
//!
//! An [`ApiSession`] owns the HTTP client and caches the bearer token for as
//! long as it lives. Test groups receive the session explicitly; share one
//! behind an `Arc` when several groups run in parallel.

use crate::api::PartnerApiClient;
use crate::config::PartnerApiConfig;
use crate::credentials::Credentials;
use crate::error::HarnessResult;
use crate::logging::{log_debug, log_info, redact};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Supplied through configuration
    PreSeeded,
    /// Issued by the token endpoint during this session
    Fetched,
}

/// A bearer token together with what the token endpoint said about it.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    pub value: String,
    pub token_type: String,
    /// Reported lifetime in seconds. Recorded only, the session never refreshes.
    pub expires_in: Option<u64>,
    pub obtained_at: DateTime<Utc>,
    pub source: TokenSource,
}

impl AccessToken {
    /// When the endpoint claims the token stops working, if it said.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.expires_in?).ok()?;
        self.obtained_at
            .checked_add_signed(ChronoDuration::try_seconds(secs)?)
    }
}

/// Token cache and HTTP client for one harness run.
#[derive(Debug)]
pub struct ApiSession {
    client: PartnerApiClient,
    token: Mutex<Option<AccessToken>>,
}

impl ApiSession {
    pub fn new(client: PartnerApiClient) -> Self {
        Self {
            client,
            token: Mutex::new(None),
        }
    }

    /// Build the client and session from configuration in one step.
    pub fn from_config(config: PartnerApiConfig) -> HarnessResult<Self> {
        Ok(Self::new(PartnerApiClient::new(config)?))
    }

    pub fn client(&self) -> &PartnerApiClient {
        &self.client
    }

    /// Bearer token for authenticated calls.
    ///
    /// The first call resolves credentials and, unless a token was
    /// pre-seeded, makes exactly one token request. Later calls return the
    /// cached value. The lock is held across the fetch so concurrent first
    /// callers share a single request.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::MissingConfiguration`](crate::HarnessError::MissingConfiguration)
    ///   before any network call when credentials are incomplete
    /// - any error from [`PartnerApiClient::request_token`]
    pub async fn access_token(&self) -> HarnessResult<String> {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.as_ref() {
            log_debug!(
                token = %redact(&token.value),
                source = ?token.source,
                "Using cached access token"
            );
            return Ok(token.value.clone());
        }

        let token = match Credentials::resolve(self.client.config())? {
            Credentials::PreSeeded(value) => {
                log_info!(token = %redact(&value), "Using stored access token");
                AccessToken {
                    value,
                    token_type: "Bearer".to_string(),
                    expires_in: None,
                    obtained_at: Utc::now(),
                    source: TokenSource::PreSeeded,
                }
            }
            Credentials::Client(credentials) => {
                let data = self.client.request_token(&credentials).await?;
                log_info!(
                    token = %redact(&data.access_token),
                    expires_in = data.expires_in,
                    "Fetched new access token"
                );
                AccessToken {
                    value: data.access_token,
                    token_type: data.token_type,
                    expires_in: Some(data.expires_in),
                    obtained_at: Utc::now(),
                    source: TokenSource::Fetched,
                }
            }
        };

        let value = token.value.clone();
        *slot = Some(token);
        Ok(value)
    }

    /// The cached token, without fetching one.
    pub async fn cached_token(&self) -> Option<AccessToken> {
        self.token.lock().await.clone()
    }
}
