//! Service metadata endpoints. None of these call Shopify.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Effective Shopify settings. Reports whether a token is set, never the token.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub shopify_store_domain: String,
    pub shopify_api_version: String,
    pub token_present: bool,
}

/// Liveness health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello from storefront-search!",
    })
}

/// Helps debug the store domain and token presence.
pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let shopify = &state.config().shopify;

    Json(ConfigResponse {
        shopify_store_domain: shopify.store_domain().into_inner(),
        shopify_api_version: shopify.api_version.clone(),
        token_present: shopify.token_present(),
    })
}
