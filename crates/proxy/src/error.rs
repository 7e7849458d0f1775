//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ConfigError;
use crate::shopify::ShopifyError;

/// Application-level error type for the proxy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required settings are missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storefront API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// HTTP status code, repeated for clients that only see the body.
    pub status: u16,
    /// Machine-readable error code.
    pub code: &'static str,
    pub message: String,
    /// Upstream payload (Shopify error body or GraphQL errors), if any.
    pub error: Option<Value>,
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    #[must_use]
    pub const fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Self::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error"),
            Self::Shopify(err) => match err {
                ShopifyError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout"),
                ShopifyError::Http(_) => (StatusCode::BAD_GATEWAY, "upstream_unreachable"),
                ShopifyError::Status { .. } => (StatusCode::BAD_GATEWAY, "upstream_http_error"),
                ShopifyError::GraphQL(_) => (StatusCode::BAD_GATEWAY, "upstream_graphql_error"),
                ShopifyError::Parse(_) => (StatusCode::BAD_GATEWAY, "upstream_invalid_response"),
                ShopifyError::InvalidPrice { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "invalid_product_data")
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                code,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let (message, error) = match self {
            Self::BadRequest(msg) => (msg, None),
            Self::Config(err) => (err.to_string(), None),
            Self::Shopify(ShopifyError::Status { body, .. }) => {
                ("Shopify request failed".to_string(), Some(body))
            }
            Self::Shopify(ShopifyError::GraphQL(errors)) => {
                ("Shopify GraphQL error".to_string(), Some(errors))
            }
            Self::Shopify(ShopifyError::Timeout(_)) => {
                ("Shopify request timed out".to_string(), None)
            }
            Self::Shopify(ShopifyError::Http(_)) => ("Could not reach Shopify".to_string(), None),
            Self::Shopify(ShopifyError::Parse(_)) => {
                ("Shopify returned an invalid response".to_string(), None)
            }
            Self::Shopify(err @ ShopifyError::InvalidPrice { .. }) => (err.to_string(), None),
        };

        let body = ErrorBody {
            status: status.as_u16(),
            code,
            message,
            error,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::json;
    use storefront_search_core::MoneyError;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");

        let err = AppError::Config(ConfigError::MissingStorefrontToken);
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing SHOPIFY_STOREFRONT_TOKEN."
        );
    }

    #[tokio::test]
    async fn test_bad_request_body() {
        let (status, body) = render(AppError::BadRequest("limit must be 1-50".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "status": 400,
                "code": "invalid_request",
                "message": "limit must be 1-50",
                "error": null
            })
        );
    }

    #[tokio::test]
    async fn test_config_error_is_server_error() {
        let (status, body) = render(ConfigError::MissingStorefrontToken.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "configuration_error");
    }

    #[tokio::test]
    async fn test_upstream_status_forwards_payload() {
        let (status, body) = render(AppError::Shopify(ShopifyError::Status {
            status: 500,
            body: json!({"errors": "Internal error"}),
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "upstream_http_error");
        assert_eq!(body["message"], "Shopify request failed");
        assert_eq!(body["error"], json!({"errors": "Internal error"}));
    }

    #[tokio::test]
    async fn test_graphql_errors_forwarded() {
        let errors = json!([{"message": "Throttled"}]);
        let (status, body) = render(ShopifyError::GraphQL(errors.clone()).into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "upstream_graphql_error");
        assert_eq!(body["error"], errors);
    }

    #[tokio::test]
    async fn test_invalid_price_is_server_error() {
        let (status, body) = render(
            ShopifyError::InvalidPrice {
                product_id: "p1".to_string(),
                source: MoneyError::MissingCurrencyCode,
            }
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "invalid_product_data");
    }

    #[test]
    fn test_parse_error_status() {
        let parse_err = serde_json::from_str::<Value>("not json").unwrap_err();
        let err = AppError::Shopify(ShopifyError::Parse(parse_err));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::BAD_GATEWAY, "upstream_invalid_response")
        );
    }
}
