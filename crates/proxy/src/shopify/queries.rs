//! GraphQL query definitions for the Shopify Storefront API.
//!
//! The document text is fixed; caller input only ever travels as variables.

use graphql_client::QueryBody;
use serde::Serialize;

/// Smallest number of products a search may request.
pub const MIN_RESULTS: i64 = 1;
/// Largest number of products a search may request.
pub const MAX_RESULTS: i64 = 50;

/// Product search by relevance, with image and first-variant price fields.
pub const PRODUCT_SEARCH_QUERY: &str =
    include_str!("../../graphql/storefront/queries/product_search.graphql");

const PRODUCT_SEARCH_OPERATION: &str = "ProductSearch";

/// Variables of the `ProductSearch` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSearchVariables {
    /// Search text, passed through verbatim.
    pub q: String,
    /// Number of products to return, within [`MIN_RESULTS`]..=[`MAX_RESULTS`].
    pub num: i64,
}

impl ProductSearchVariables {
    /// Build variables for a search, clamping `limit` into the allowed range.
    #[must_use]
    pub fn new(query: &str, limit: i64) -> Self {
        Self {
            q: query.to_string(),
            num: clamp_limit(limit),
        }
    }
}

/// Clamp a requested result count to [`MIN_RESULTS`]..=[`MAX_RESULTS`].
#[must_use]
pub const fn clamp_limit(limit: i64) -> i64 {
    if limit < MIN_RESULTS {
        MIN_RESULTS
    } else if limit > MAX_RESULTS {
        MAX_RESULTS
    } else {
        limit
    }
}

/// Build the request body for a product search.
#[must_use]
pub fn product_search(query: &str, limit: i64) -> QueryBody<ProductSearchVariables> {
    QueryBody {
        variables: ProductSearchVariables::new(query, limit),
        query: PRODUCT_SEARCH_QUERY,
        operation_name: PRODUCT_SEARCH_OPERATION,
    }
}
