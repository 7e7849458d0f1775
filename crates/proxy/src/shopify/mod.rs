//! Shopify Storefront API client for product search.
//!
//! # Architecture
//!
//! - `graphql_client` request bodies, sent with `reqwest` directly
//! - One POST per search, no caching, no retries
//! - The upstream response is deserialized into option-typed structs
//!   ([`types`]) and flattened into [`ProductResult`]s ([`conversions`])
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_search_proxy::shopify::StorefrontClient;
//!
//! let client = StorefrontClient::new(&config.shopify)?;
//! let products = client
//!     .search_products(&domain, token, "black shoes", 5)
//!     .await?;
//! ```
//!
//! [`ProductResult`]: storefront_search_core::ProductResult

mod client;
pub mod conversions;
pub mod queries;
pub mod types;

pub use client::StorefrontClient;

use serde_json::Value;
use storefront_search_core::MoneyError;
use thiserror::Error;

/// Errors that can occur when interacting with the Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// The request did not complete within the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Shopify answered with a non-200 status.
    ///
    /// `body` is the response parsed as JSON, or the raw text as a JSON string.
    #[error("Shopify returned HTTP {status}: {}", summarize_body(.body))]
    Status { status: u16, body: Value },

    /// The GraphQL response carried an `errors` member.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Value),

    /// The response body was not valid JSON of the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product price could not be converted.
    #[error("Invalid price for product {product_id:?}: {source}")]
    InvalidPrice {
        product_id: String,
        #[source]
        source: MoneyError,
    },
}

impl From<reqwest::Error> for ShopifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Http(err)
        }
    }
}

/// First 200 characters of an error body, for log lines and messages.
fn summarize_body(body: &Value) -> String {
    body.to_string().chars().take(200).collect()
}

/// Render a GraphQL `errors` value for logs and error messages.
///
/// Each error contributes its message, path, and first location when present.
fn format_graphql_errors(errors: &Value) -> String {
    let Some(errors) = errors.as_array() else {
        return errors.to_string();
    };

    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if let Some(message) = e.get("message").and_then(Value::as_str)
                && !message.is_empty()
            {
                parts.push(message.to_string());
            }

            if let Some(path) = e.get("path").and_then(Value::as_array)
                && !path.is_empty()
            {
                let path_str = path
                    .iter()
                    .map(|p| match p {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e
                .get("locations")
                .and_then(Value::as_array)
                .and_then(|locs| locs.first())
            {
                let line = loc.get("line").and_then(Value::as_i64).unwrap_or_default();
                let column = loc.get("column").and_then(Value::as_i64).unwrap_or_default();
                parts.push(format!("at line {line}:{column}"));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
