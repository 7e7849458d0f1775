//! Simplified product search results.

use serde::{Deserialize, Serialize};

use super::{Money, StoreDomain};

/// A product as returned to search callers.
///
/// Only `id`, `title`, and `handle` are always present; everything else is
/// `null` when the store did not provide it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResult {
    /// Opaque Shopify GID (e.g., `gid://shopify/Product/123`).
    pub id: String,
    pub title: String,
    /// URL-safe product slug.
    pub handle: String,
    /// Public online store URL, when the product is published there.
    pub url: Option<String>,
    /// Price of the first variant.
    pub price: Option<Money>,
    /// Featured image URL, or the first gallery image.
    pub image: Option<String>,
    pub image_alt: Option<String>,
}

/// Response body of a product search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Store the search ran against.
    pub store: StoreDomain,
    /// Query text, echoed back verbatim.
    pub query: String,
    /// Number of entries in `results`.
    pub count: usize,
    /// Results in upstream relevance order.
    pub results: Vec<ProductResult>,
}

impl SearchResponse {
    /// Create a search response. `count` is always derived from `results`.
    #[must_use]
    pub fn new(store: StoreDomain, query: String, results: Vec<ProductResult>) -> Self {
        Self {
            store,
            query,
            count: results.len(),
            results,
        }
    }
}
