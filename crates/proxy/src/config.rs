//! Proxy configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Shopify
//! - `SHOPIFY_STORE_DOMAIN` - Default store domain (default: example.myshopify.com)
//! - `SHOPIFY_STOREFRONT_TOKEN` - Storefront API access token (default: empty)
//! - `SHOPIFY_API_VERSION` - API version (default: 2024-07)
//! - `REQUEST_TIMEOUT_SECONDS` - Upstream request timeout (default: 8)
//!
//! ## Server
//! - `PROXY_HOST` - Bind address (default: 127.0.0.1)
//! - `PROXY_PORT` - Listen port (default: 8000)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! A missing domain or token does not fail loading. Those are checked by
//! [`ShopifyConfig::ensure_configured`] when a search needs them.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use storefront_search_core::StoreDomain;
use thiserror::Error;

const DEFAULT_STORE_DOMAIN: &str = "example.myshopify.com";
const DEFAULT_API_VERSION: &str = "2024-07";
const DEFAULT_TIMEOUT_SECONDS: &str = "8";

/// Configuration errors that can occur during loading or validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error(
        "Invalid SHOPIFY_STORE_DOMAIN {0:?}. Expected 'myshop.myshopify.com' (no protocol, no trailing slash)."
    )]
    InvalidStoreDomain(String),
    #[error("Missing SHOPIFY_STOREFRONT_TOKEN.")]
    MissingStorefrontToken,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per line, for log shippers.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Search proxy configuration.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    pub log_format: LogFormat,
    /// Shopify Storefront API configuration
    pub shopify: ShopifyConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyConfig {
    /// Store domain as configured; see [`Self::store_domain`] for the normalized form
    pub store_domain: String,
    /// Storefront API access token, whitespace-trimmed (may be empty)
    pub storefront_token: SecretString,
    /// Shopify API version (e.g., 2024-07)
    pub api_version: String,
    /// Timeout for a single upstream request
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("store_domain", &self.store_domain)
            .field("storefront_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ProxyConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_env_or_default(&lookup, "PROXY_HOST", "127.0.0.1")?;
        let port = parse_env_or_default(&lookup, "PROXY_PORT", "8000")?;
        let log_format = parse_env_or_default(&lookup, "LOG_FORMAT", "text")?;
        let shopify = ShopifyConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            log_format,
            shopify,
            sentry_dsn: get_optional_env(&lookup, "SENTRY_DSN"),
            sentry_environment: get_optional_env(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_secs: f64 =
            parse_env_or_default(lookup, "REQUEST_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS)?;
        let request_timeout = Duration::try_from_secs_f64(timeout_secs)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "REQUEST_TIMEOUT_SECONDS".to_string(),
                    format!("must be a positive number of seconds (got {timeout_secs})"),
                )
            })?;

        let token = get_env_or_default(lookup, "SHOPIFY_STOREFRONT_TOKEN", "");

        Ok(Self {
            store_domain: get_env_or_default(lookup, "SHOPIFY_STORE_DOMAIN", DEFAULT_STORE_DOMAIN),
            storefront_token: SecretString::from(token.trim().to_string()),
            api_version: get_env_or_default(lookup, "SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            request_timeout,
        })
    }

    /// The configured store domain, normalized.
    #[must_use]
    pub fn store_domain(&self) -> StoreDomain {
        StoreDomain::normalize(&self.store_domain)
    }

    /// Whether an access token is configured. Never exposes the token itself.
    #[must_use]
    pub fn token_present(&self) -> bool {
        !self.storefront_token.expose_secret().is_empty()
    }

    /// The access token, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingStorefrontToken`] if the token is empty.
    pub fn storefront_token(&self) -> Result<&SecretString, ConfigError> {
        if self.token_present() {
            Ok(&self.storefront_token)
        } else {
            Err(ConfigError::MissingStorefrontToken)
        }
    }

    /// Check that the default store can be searched and return its domain.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the normalized domain is empty or has no `.`,
    /// or if the access token is empty.
    pub fn ensure_configured(&self) -> Result<StoreDomain, ConfigError> {
        let domain = self.store_domain();
        if !domain.is_plausible() {
            return Err(ConfigError::InvalidStoreDomain(domain.into_inner()));
        }
        self.storefront_token()?;
        Ok(domain)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to a default value.
fn parse_env_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(lookup, key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ProxyConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ProxyConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn shopify(store_domain: &str, token: &str) -> ShopifyConfig {
        ShopifyConfig {
            store_domain: store_domain.to_string(),
            storefront_token: SecretString::from(token.to_string()),
            api_version: "2024-07".to_string(),
            request_timeout: Duration::from_secs(8),
        }
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8000");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.shopify.store_domain, "example.myshopify.com");
        assert_eq!(config.shopify.api_version, "2024-07");
        assert_eq!(config.shopify.request_timeout, Duration::from_secs(8));
        assert!(!config.shopify.token_present());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PROXY_HOST", "0.0.0.0"),
            ("PROXY_PORT", "9000"),
            ("LOG_FORMAT", "JSON"),
            ("SHOPIFY_STORE_DOMAIN", "https://shop.myshopify.com/"),
            ("SHOPIFY_STOREFRONT_TOKEN", "  tok_123  "),
            ("SHOPIFY_API_VERSION", "2025-01"),
            ("REQUEST_TIMEOUT_SECONDS", "2.5"),
            ("SENTRY_DSN", ""),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.shopify.store_domain().as_str(), "shop.myshopify.com");
        assert_eq!(config.shopify.storefront_token.expose_secret(), "tok_123");
        assert_eq!(config.shopify.api_version, "2025-01");
        assert_eq!(config.shopify.request_timeout, Duration::from_millis(2500));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("PROXY_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PROXY_PORT"));
    }

    #[test]
    fn test_invalid_timeout() {
        for value in ["0", "-1", "soon"] {
            let err = load(&[("REQUEST_TIMEOUT_SECONDS", value)]).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidEnvVar(key, _) if key == "REQUEST_TIMEOUT_SECONDS"),
                "{value}: {err}"
            );
        }
    }

    #[test]
    fn test_invalid_log_format() {
        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_ensure_configured_ok() {
        let domain = shopify("https://shop.myshopify.com/", "tok")
            .ensure_configured()
            .unwrap();
        assert_eq!(domain.as_str(), "shop.myshopify.com");
    }

    #[test]
    fn test_ensure_configured_rejects_bad_domain() {
        for raw in ["", "https://", "localhost"] {
            let err = shopify(raw, "tok").ensure_configured().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidStoreDomain(_)), "{raw}");
        }
    }

    #[test]
    fn test_ensure_configured_rejects_missing_token() {
        let err = shopify("shop.myshopify.com", "")
            .ensure_configured()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingStorefrontToken));
    }

    #[test]
    fn test_shopify_config_debug_redacts_token() {
        let debug_output = format!("{:?}", shopify("shop.myshopify.com", "super_secret_token"));

        assert!(debug_output.contains("shop.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
