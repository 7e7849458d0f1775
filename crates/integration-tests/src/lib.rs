//! Integration tests for the storefront search proxy.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-search-integration-tests
//! ```
//!
//! Every test drives the real router with `tower::ServiceExt::oneshot` and
//! points the Storefront API client at a local `wiremock` server, so no
//! network traffic leaves the machine.

use std::collections::HashMap;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode},
};
use serde_json::{Value, json};
use storefront_search_proxy::{
    config::ProxyConfig, routes, shopify::StorefrontClient, state::AppState,
};
use tower::ServiceExt;
use wiremock::MockServer;

/// API version used by every test configuration.
pub const API_VERSION: &str = "2024-07";
/// Access token used by every test configuration that has one.
pub const TOKEN: &str = "shpat_test_token";
/// Path the proxy posts GraphQL requests to.
pub const GRAPHQL_PATH: &str = "/api/2024-07/graphql.json";

/// A response from the router under test.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Host and port of a mock server, usable as a store domain.
#[must_use]
pub fn mock_store(server: &MockServer) -> String {
    server.address().to_string()
}

/// Build a configuration from the given variables on top of test defaults.
///
/// # Panics
///
/// Panics if the variables do not form a valid configuration.
#[must_use]
pub fn config(vars: &[(&str, &str)]) -> ProxyConfig {
    let mut all: HashMap<String, String> = HashMap::from([
        ("SHOPIFY_API_VERSION".to_string(), API_VERSION.to_string()),
        ("SHOPIFY_STOREFRONT_TOKEN".to_string(), TOKEN.to_string()),
    ]);
    all.extend(vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())));

    ProxyConfig::from_lookup(|key| all.get(key).cloned()).expect("valid test configuration")
}

/// Build the application with a client that talks plain HTTP to mock servers.
///
/// # Panics
///
/// Panics if the Storefront API client cannot be built.
#[must_use]
pub fn app(config: ProxyConfig) -> Router {
    let client = StorefrontClient::new(&config.shopify)
        .expect("build storefront client")
        .with_plain_http();
    routes::app(AppState::with_client(config, client))
}

/// Build the application against a mock store configured as the default store.
#[must_use]
pub fn app_for(server: &MockServer) -> Router {
    app(config(&[("SHOPIFY_STORE_DOMAIN", &mock_store(server))]))
}

/// Send a GET request through the router.
///
/// # Panics
///
/// Panics if the request cannot be built or the body is not JSON.
pub async fn get(app: Router, uri: &str) -> TestResponse {
    get_with_headers(app, uri, &[]).await
}

/// Send a GET request with extra headers through the router.
///
/// # Panics
///
/// Panics if the request cannot be built or the body is not JSON.
pub async fn get_with_headers(app: Router, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let response = app
        .oneshot(builder.body(Body::empty()).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let body = serde_json::from_slice(&bytes).expect("json body");

    TestResponse {
        status,
        headers,
        body,
    }
}

/// A Storefront API product node with price and images.
#[must_use]
pub fn product_node(id: &str, title: &str, amount: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{id}"),
        "title": title,
        "handle": title.to_lowercase().replace(' ', "-"),
        "onlineStoreUrl": format!("https://shop.example.com/products/{id}"),
        "featuredImage": {"url": format!("https://cdn.example.com/{id}.png"), "altText": title},
        "images": {"edges": [{"node": {"url": "https://cdn.example.com/gallery.png", "altText": "gallery"}}]},
        "variants": {"edges": [{"node": {
            "price": {"amount": amount, "currencyCode": "USD"},
            "priceV2": {"amount": amount, "currencyCode": "USD"}
        }}]}
    })
}

/// Wrap product nodes in a successful `ProductSearch` response.
#[must_use]
pub fn search_response(nodes: Vec<Value>) -> Value {
    let edges: Vec<Value> = nodes.into_iter().map(|node| json!({"node": node})).collect();
    json!({"data": {"products": {"edges": edges}}})
}
