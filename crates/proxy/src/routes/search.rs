//! Search route handler.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use storefront_search_core::SearchResponse;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::search::{DEFAULT_LIMIT, search_products};
use crate::shopify::queries::{MAX_RESULTS, MIN_RESULTS};
use crate::state::AppState;

/// Raw `/search` query parameters, validated by [`SearchParams::validate`].
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Search text, e.g. `BLACK NIKE SHOES`
    pub q: Option<String>,
    /// Number of results, 1-50 (default 5)
    pub limit: Option<String>,
    /// Store domain overriding the configured one, e.g. `myshop.myshopify.com`
    pub store: Option<String>,
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub limit: i64,
    pub store: Option<String>,
}

impl SearchParams {
    /// Validate the parameters. Out-of-range limits are rejected, not clamped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if `q` is missing or empty, or `limit`
    /// is present but not an integer in 1..=50.
    pub fn validate(self) -> Result<SearchRequest> {
        let query = self
            .q
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::BadRequest("q must be a non-empty string".to_string()))?;

        let limit = match self.limit.as_deref() {
            None => DEFAULT_LIMIT,
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|limit| (MIN_RESULTS..=MAX_RESULTS).contains(limit))
                .ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "limit must be an integer between {MIN_RESULTS} and {MAX_RESULTS} (got '{raw}')"
                    ))
                })?,
        };

        Ok(SearchRequest {
            query,
            limit,
            store: self.store.filter(|s| !s.is_empty()),
        })
    }
}

/// Search products on a Shopify store via the Storefront GraphQL API.
///
/// Returns the top `limit` results by relevance in a simplified list.
#[instrument(skip(state, params))]
pub async fn search(
    State(state): State<AppState>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let request = params.validate()?;

    let response = search_products(
        &state,
        &request.query,
        request.limit,
        request.store.as_deref(),
    )
    .await?;

    Ok(Json(response))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn params(q: Option<&str>, limit: Option<&str>, store: Option<&str>) -> SearchParams {
        SearchParams {
            q: q.map(String::from),
            limit: limit.map(String::from),
            store: store.map(String::from),
        }
    }

    #[test]
    fn test_defaults() {
        let request = params(Some("black shoes"), None, None).validate().unwrap();
        assert_eq!(
            request,
            SearchRequest {
                query: "black shoes".to_string(),
                limit: 5,
                store: None,
            }
        );
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let request = params(Some("  hat "), Some("50"), None).validate().unwrap();
        assert_eq!(request.query, "  hat ");
        assert_eq!(request.limit, 50);
    }

    #[test]
    fn test_whitespace_query_is_accepted() {
        let request = params(Some("   "), None, None).validate().unwrap();
        assert_eq!(request.query, "   ");
    }

    #[test]
    fn test_missing_or_empty_query() {
        for q in [None, Some("")] {
            assert!(matches!(
                params(q, None, None).validate(),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_limit_bounds() {
        for ok in ["1", "25", "50", " 7 "] {
            assert!(params(Some("x"), Some(ok), None).validate().is_ok(), "{ok}");
        }
        for bad in ["", "  ", "0", "51", "-1", "abc", "2.5", "99999999999999999999"] {
            assert!(
                matches!(
                    params(Some("x"), Some(bad), None).validate(),
                    Err(AppError::BadRequest(_))
                ),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_absent_limit_uses_default() {
        let request = params(Some("x"), None, None).validate().unwrap();
        assert_eq!(request.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_empty_store_is_ignored() {
        let request = params(Some("x"), None, Some("")).validate().unwrap();
        assert!(request.store.is_none());

        let request = params(Some("x"), None, Some("other.myshopify.com"))
            .validate()
            .unwrap();
        assert_eq!(request.store.as_deref(), Some("other.myshopify.com"));
    }
}
