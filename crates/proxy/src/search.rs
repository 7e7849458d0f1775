//! Product search against the configured store or a per-request override.

use storefront_search_core::{SearchResponse, StoreDomain};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Default number of results when the caller does not ask for a count.
pub const DEFAULT_LIMIT: i64 = 5;

/// Resolve the store to search.
///
/// A non-empty override is normalized and used as-is, without the plausibility
/// check the configured default has to pass.
///
/// # Errors
///
/// Returns a configuration error if no override is given and the configured
/// store is invalid or has no access token.
pub fn resolve_store(state: &AppState, store_override: Option<&str>) -> Result<StoreDomain> {
    match store_override.filter(|s| !s.is_empty()) {
        Some(raw) => Ok(StoreDomain::normalize(raw)),
        None => Ok(state.config().shopify.ensure_configured()?),
    }
}

/// Search products and build the response body.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or the Storefront API call fails.
#[instrument(skip(state))]
pub async fn search_products(
    state: &AppState,
    query: &str,
    limit: i64,
    store_override: Option<&str>,
) -> Result<SearchResponse> {
    let store = resolve_store(state, store_override)?;
    let token = state.config().shopify.storefront_token()?;

    let results = state
        .storefront()
        .search_products(&store, token, query, limit)
        .await?;

    tracing::info!(store = %store, count = results.len(), "Search completed");
    Ok(SearchResponse::new(store, query.to_string(), results))
}
