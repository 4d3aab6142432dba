//! Test groups over the partner API
//!
//! Each group runs its setup once (token, then a single request) and exposes
//! independent checks over the stored response:
//!
//! - `order` - `POST /orders` with the sandbox package fixture
//! - `listing` - `GET /sims` without filters

pub mod listing;
pub mod order;

pub use listing::SimListingFixture;
pub use order::OrderCreationFixture;
