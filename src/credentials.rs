//! Credential resolution for the partner API.

use crate::config::{env, PartnerApiConfig};
use crate::error::{HarnessError, HarnessResult};

/// Client credentials for the OAuth2 client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Where the session's bearer token comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A token supplied up front; no token request is made.
    PreSeeded(String),
    /// Credentials exchanged at the token endpoint.
    Client(ClientCredentials),
}

impl Credentials {
    /// Decide how to authenticate from `config`.
    ///
    /// A pre-seeded access token wins. Without one, both `CLIENT_ID` and
    /// `CLIENT_SECRET` are required, checked in that order. Never touches
    /// the network.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::MissingConfiguration`] naming the first absent
    /// variable.
    pub fn resolve(config: &PartnerApiConfig) -> HarnessResult<Self> {
        if let Some(token) = present(&config.access_token) {
            return Ok(Self::PreSeeded(token.to_string()));
        }

        let client_id =
            present(&config.client_id).ok_or_else(|| HarnessError::missing_configuration(env::CLIENT_ID))?;
        let client_secret = present(&config.client_secret)
            .ok_or_else(|| HarnessError::missing_configuration(env::CLIENT_SECRET))?;

        Ok(Self::Client(ClientCredentials {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
