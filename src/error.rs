//! Error types for harness operations.
//!
//! This module provides structured error handling for the partner API
//! session, the response checks and the storefront page object.
//!
//! # Error Types
//!
//! The main error type is [`HarnessError`], which covers all failure modes:
//! - Configuration errors (missing credentials, malformed URLs)
//! - Transport and HTTP status failures
//! - Response bodies that cannot be parsed
//! - Content mismatches collected by a [`CheckReport`](crate::checks::CheckReport)
//! - Browser-side failures (missing elements, timeouts, WebDriver errors)
//!
//! # Error Handling Example
//!
//! ```rust,no_run
//! use esim_partner_e2e::{HarnessError, error::ErrorCategory};
//!
//! fn handle_error(err: HarnessError) {
//!     match err.category() {
//!         ErrorCategory::Client => println!("Fix the environment: {err}"),
//!         ErrorCategory::Validation => println!("Sandbox returned unexpected data: {err}"),
//!         _ => println!("Upstream problem: {err}"),
//!     }
//! }
//! ```

use crate::checks::CheckFailure;
use crate::logging::{log_debug, log_error, log_warn};
use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// High-level categorization of errors for routing and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The run was misconfigured (missing environment, bad URLs).
    ///
    /// Nothing was sent over the network; fix the environment and rerun.
    Client,

    /// The partner API or the WebDriver server misbehaved.
    External,

    /// A response arrived but its content did not match the fixture.
    Validation,

    /// The storefront did not render what the page object expected.
    Ui,
}

/// Severity level for logging decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Action failed and the enclosing group cannot continue.
    Error,

    /// Unexpected but the run can carry on with other groups.
    Warning,

    /// Expected outcome for optional elements, e.g. a banner that never showed.
    Info,
}

// ============================================================================
// Harness error types
// ============================================================================

/// Convenient result type for harness operations.
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;

/// Errors that can occur while driving the partner API or the storefront.
///
/// Use the constructor methods, which log the error at creation:
///
/// ```rust
/// use esim_partner_e2e::HarnessError;
///
/// let err = HarnessError::missing_configuration("CLIENT_ID");
/// assert_eq!(err.to_string(), "CLIENT_ID environment variable must be set");
/// ```
///
/// | Variant | Category | Absence |
/// |---------|----------|---------|
/// | `MissingConfiguration` | Client | No |
/// | `ConfigurationError` | Client | No |
/// | `RequestFailed` | External | No |
/// | `AuthenticationFailed` | External | No |
/// | `UnexpectedStatus` | External | No |
/// | `ResponseParsingError` | External | No |
/// | `ValidationFailed` | Validation | No |
/// | `ElementNotFound` | Ui | Yes |
/// | `Timeout` | Ui | Yes |
/// | `WebDriver` | External | No |
/// | `CountryNotFound` | Ui | No |
#[derive(Error, Debug)]
pub enum HarnessError {
    /// A required environment variable is absent or empty.
    #[error("{variable} environment variable must be set")]
    MissingConfiguration {
        /// Name of the missing variable.
        variable: &'static str,
    },

    /// Configuration is present but unusable.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The HTTP request could not be completed.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying transport error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The token endpoint rejected the client credentials.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Details returned by the endpoint.
        message: String,
    },

    /// An endpoint answered with a non-success status where success was required.
    #[error("Unexpected status {status} from {endpoint}: {body}")]
    UnexpectedStatus {
        /// Endpoint that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A response body was not the JSON shape the caller needs.
    #[error("Response parsing failed: {message}")]
    ResponseParsingError {
        /// Details about the parsing failure.
        message: String,
    },

    /// One or more response checks failed.
    #[error("{group}: {} check(s) failed: {}", .failures.len(), summarize(.failures))]
    ValidationFailed {
        /// Name of the check group.
        group: String,
        /// Every mismatched field, in check order.
        failures: Vec<CheckFailure>,
    },

    /// No element matched the locator.
    #[error("No element matches {locator}")]
    ElementNotFound {
        /// Human-readable locator description.
        locator: String,
    },

    /// Waiting for a browser-side condition ran out of time.
    #[error("Timed out after {timeout_ms}ms waiting for {what}")]
    Timeout {
        /// What was being waited for.
        what: String,
        /// The timeout that was exceeded.
        timeout_ms: u64,
    },

    /// The WebDriver server returned an error payload.
    #[error("WebDriver error {error}: {message}")]
    WebDriver {
        /// W3C error code, e.g. `element click intercepted`.
        error: String,
        /// Message returned by the server.
        message: String,
    },

    /// The storefront search could not select the requested country.
    #[error("Country {country} not found")]
    CountryNotFound {
        /// Country that was searched for.
        country: String,
        /// What went wrong while searching.
        #[source]
        source: Box<HarnessError>,
    },
}

fn summarize(failures: &[CheckFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl HarnessError {
    /// Get the error category for reporting.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingConfiguration { .. } => ErrorCategory::Client,
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::RequestFailed { .. } => ErrorCategory::External,
            Self::AuthenticationFailed { .. } => ErrorCategory::External,
            Self::UnexpectedStatus { .. } => ErrorCategory::External,
            Self::ResponseParsingError { .. } => ErrorCategory::External,
            Self::ValidationFailed { .. } => ErrorCategory::Validation,
            Self::ElementNotFound { .. } => ErrorCategory::Ui,
            Self::Timeout { .. } => ErrorCategory::Ui,
            Self::WebDriver { .. } => ErrorCategory::External,
            Self::CountryNotFound { .. } => ErrorCategory::Ui,
        }
    }

    /// Get the error severity for logging.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingConfiguration { .. } => ErrorSeverity::Error,
            Self::ConfigurationError { .. } => ErrorSeverity::Error,
            Self::RequestFailed { .. } => ErrorSeverity::Error,
            Self::AuthenticationFailed { .. } => ErrorSeverity::Error,
            Self::UnexpectedStatus { .. } => ErrorSeverity::Error,
            Self::ResponseParsingError { .. } => ErrorSeverity::Error,
            Self::ValidationFailed { .. } => ErrorSeverity::Warning,
            Self::ElementNotFound { .. } => ErrorSeverity::Info,
            Self::Timeout { .. } => ErrorSeverity::Info,
            Self::WebDriver { .. } => ErrorSeverity::Error,
            Self::CountryNotFound { .. } => ErrorSeverity::Error,
        }
    }

    /// Whether this error only says "the element is not there".
    ///
    /// Optional storefront elements (privacy banner, notification prompt)
    /// treat these as [`Presence::Absent`](crate::ui::Presence::Absent);
    /// everything else still propagates.
    pub fn is_absence(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. } | Self::Timeout { .. })
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    /// Create a missing-configuration error (logs at ERROR level).
    pub fn missing_configuration(variable: &'static str) -> Self {
        log_error!(
            variable = variable,
            error_type = "missing_configuration",
            "Required environment variable is not set"
        );
        Self::MissingConfiguration { variable }
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_message = %message,
            error_type = "configuration_error",
            "Harness configuration error"
        );
        Self::ConfigurationError { message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_message = %message,
            has_source = source.is_some(),
            error_type = "request_failed",
            "HTTP request failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn authentication_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_message = %message,
            error_type = "authentication_failed",
            "Token endpoint rejected the credentials"
        );
        Self::AuthenticationFailed { message }
    }

    pub fn unexpected_status(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let body = body.into();
        log_error!(
            endpoint = %endpoint,
            status = status,
            body = %body,
            error_type = "unexpected_status",
            "Endpoint returned a non-success status"
        );
        Self::UnexpectedStatus {
            endpoint,
            status,
            body,
        }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_message = %message,
            error_type = "response_parsing_error",
            "Failed to parse response body"
        );
        Self::ResponseParsingError { message }
    }

    /// Create a validation error (logs at WARN level with every failure).
    pub fn validation_failed(group: impl Into<String>, failures: Vec<CheckFailure>) -> Self {
        let group = group.into();
        for failure in &failures {
            log_warn!(
                group = %group,
                check = failure.check,
                field = %failure.field,
                expected = %failure.expected,
                actual = %failure.actual,
                "Response check failed"
            );
        }
        Self::ValidationFailed { group, failures }
    }

    /// Create an element-not-found error (logs at DEBUG level; often expected).
    pub fn element_not_found(locator: impl Into<String>) -> Self {
        let locator = locator.into();
        log_debug!(locator = %locator, "No element matches locator");
        Self::ElementNotFound { locator }
    }

    pub fn timeout(what: impl Into<String>, timeout_ms: u64) -> Self {
        let what = what.into();
        log_debug!(
            what = %what,
            timeout_ms = timeout_ms,
            "Timed out waiting for browser condition"
        );
        Self::Timeout { what, timeout_ms }
    }

    pub fn webdriver(error: impl Into<String>, message: impl Into<String>) -> Self {
        let error = error.into();
        let message = message.into();
        log_error!(
            webdriver_error = %error,
            error_message = %message,
            error_type = "webdriver",
            "WebDriver command failed"
        );
        Self::WebDriver { error, message }
    }

    pub fn country_not_found(country: impl Into<String>, source: HarnessError) -> Self {
        let country = country.into();
        log_error!(
            country = %country,
            cause = %source,
            error_type = "country_not_found",
            "Error selecting country"
        );
        Self::CountryNotFound {
            country,
            source: Box::new(source),
        }
    }
}
