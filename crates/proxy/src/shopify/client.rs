//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` request bodies with `reqwest` 0.13 for HTTP.

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use storefront_search_core::{ProductResult, StoreDomain};
use tracing::{debug, instrument};

use super::ShopifyError;
use super::conversions::convert_search_response;
use super::queries;
use super::types::GraphQLResponse;
use crate::config::ShopifyConfig;

/// Header carrying the Storefront API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Client for the Shopify Storefront API.
///
/// The target store is chosen per call; the API version and timeout come from
/// configuration. Cheap to clone.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    api_version: String,
    scheme: &'static str,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ShopifyConfig) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(StorefrontClientInner {
                client,
                api_version: config.api_version.clone(),
                scheme: "https",
            }),
        })
    }

    /// Talk plain HTTP to the store. Only meant for local mock servers.
    #[must_use]
    pub fn with_plain_http(self) -> Self {
        Self {
            inner: Arc::new(StorefrontClientInner {
                client: self.inner.client.clone(),
                api_version: self.inner.api_version.clone(),
                scheme: "http",
            }),
        }
    }

    /// GraphQL endpoint of a store.
    #[must_use]
    pub fn endpoint(&self, domain: &StoreDomain) -> String {
        format!(
            "{}://{}/api/{}/graphql.json",
            self.inner.scheme, domain, self.inner.api_version
        )
    }

    /// Search a store's products by relevance.
    ///
    /// `limit` is clamped to 1..=50.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or times out, Shopify answers
    /// with a non-200 status or GraphQL errors, or a product price is malformed.
    #[instrument(skip(self, token), fields(store = %domain))]
    pub async fn search_products(
        &self,
        domain: &StoreDomain,
        token: &SecretString,
        query: &str,
        limit: i64,
    ) -> Result<Vec<ProductResult>, ShopifyError> {
        let response = self
            .execute(domain, token, &queries::product_search(query, limit))
            .await?;

        let products = convert_search_response(&response)?;
        debug!(count = products.len(), "Product search completed");
        Ok(products)
    }

    /// Execute a GraphQL request and check the response for errors.
    async fn execute<B: serde::Serialize + Sync>(
        &self,
        domain: &StoreDomain,
        token: &SecretString,
        request_body: &B,
    ) -> Result<GraphQLResponse, ShopifyError> {
        let response = self
            .inner
            .client
            .post(self.endpoint(domain))
            .header(ACCESS_TOKEN_HEADER, token.expose_secret())
            .header("Content-Type", "application/json")
            .json(request_body)
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if status != StatusCode::OK {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::Status {
                status: status.as_u16(),
                body: parse_error_body(response_text),
            });
        }

        let response: GraphQLResponse = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors {
            tracing::debug!(errors = %errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(errors));
        }

        Ok(response)
    }
}

/// Error bodies are forwarded as JSON when they parse, otherwise as raw text.
fn parse_error_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
