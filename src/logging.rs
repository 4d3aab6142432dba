//! Logging utilities for esim-partner-e2e
//!
//! Re-exports tracing macros with log_* naming convention for consistency.

// Re-export tracing macros with log_* naming
pub use tracing::{
    debug as log_debug,
    error as log_error,
    info as log_info,
    warn as log_warn,
};

/// Shortened form of a secret for log fields.
///
/// Tokens are never logged in full; only the first few characters survive.
pub(crate) fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(6).collect();
    if prefix.len() < secret.len() {
        format!("{prefix}…")
    } else {
        "***".to_string()
    }
}
