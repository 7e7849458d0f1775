//! HTTP route handlers for the proxy.
//!
//! # Route Structure
//!
//! ```text
//! GET  /          - Greeting
//! GET  /health    - Health check
//! GET  /_config   - Effective Shopify settings (token presence only)
//! GET  /search    - Product search (?q=&limit=&store=)
//! ```

pub mod meta;
pub mod search;

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, Method},
    middleware,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::{REQUEST_ID_HEADER, request_id_middleware};
use crate::state::AppState;

/// Create all routes for the proxy.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(meta::root))
        .route("/health", get(meta::health))
        .route("/_config", get(meta::config))
        .route("/search", get(search::search))
}

/// Build the application: routes, state, and the middleware stack.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
        )
    });

    routes()
        .with_state(state)
        .layer(build_cors())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
}

/// Any origin may call the read-only endpoints.
fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}
