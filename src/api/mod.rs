//! Partner REST API
//!
//! - `types` - Request/response structures for `/token`, `/orders` and `/sims`
//! - `client` - `reqwest`-based client, one method per endpoint

pub mod client;
pub mod types;

pub use client::{CapturedResponse, PartnerApiClient};
pub use types::*;
