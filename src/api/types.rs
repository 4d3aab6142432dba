//! Partner API request and response structures

use serde::{Deserialize, Serialize};

/// `meta` object shared by the token and order responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenData {
    pub token_type: String,
    /// Lifetime in seconds as reported by the token endpoint
    pub expires_in: u64,
    pub access_token: String,
}

/// Response of `POST /token`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub data: TokenData,
    pub meta: Meta,
}

/// One provisioned eSIM, as returned inside orders and sim listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimDetails {
    pub id: u64,
    pub created_at: String,
    pub iccid: String,
    pub matching_id: String,
    pub is_roaming: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderData {
    pub currency: String,
    pub package_id: String,
    pub quantity: u32,
    pub description: String,
    pub esim_type: String,
    pub validity: u32,
    pub data: String,
    /// HTML instructions for installing the eSIM by hand
    pub manual_installation: String,
    pub sims: Vec<SimDetails>,
}

/// Response of `POST /orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub data: OrderData,
    pub meta: Meta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    /// Absent on the last page
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListMeta {
    pub message: String,
    pub current_page: u32,
    pub path: String,
    /// The API reports page size as a string, e.g. `"25"`
    pub per_page: String,
    pub total: u64,
}

/// Response of `GET /sims`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsimListResponse {
    pub data: Vec<SimDetails>,
    pub links: PageLinks,
    pub meta: ListMeta,
}

/// Form body of `POST /orders`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub package_id: String,
    pub quantity: u32,
    pub description: String,
}

impl OrderRequest {
    pub fn new(package_id: impl Into<String>, quantity: u32, description: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            quantity,
            description: description.into(),
        }
    }

    /// Six 7-day 1 GB eSIMs; the sandbox answers this with fixed values.
    pub fn sandbox_default() -> Self {
        Self::new(
            "kallur-digital-7days-1gb",
            6,
            "This is a test order for 6 eSIMs",
        )
    }

    /// Form fields in the order the API documents them. Quantity goes over
    /// the wire as a decimal string.
    pub fn form_fields(&self) -> [(&'static str, String); 3] {
        [
            ("package_id", self.package_id.clone()),
            ("quantity", self.quantity.to_string()),
            ("description", self.description.clone()),
        ]
    }
}

/// Optional query parameters of `GET /sims`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl SimListQuery {
    /// Query pairs to append; empty for the default (unfiltered) listing.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}
