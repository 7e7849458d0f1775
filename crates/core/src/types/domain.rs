//! Shopify store domain type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// URL schemes that are stripped from a configured store domain.
const SCHEME_PREFIXES: &[&str] = &["http://", "https://"];

/// A normalized Shopify store domain (e.g., `my-shop.myshopify.com`).
///
/// Normalization never fails. Whether the result is usable as a configured
/// store is a separate question answered by [`StoreDomain::is_plausible`],
/// because a per-request override is accepted without that check.
///
/// ## Normalization
///
/// - Surrounding whitespace is trimmed
/// - One leading `http://` or `https://` is removed (case-sensitive)
/// - Leading and trailing `/` are removed
///
/// ## Examples
///
/// ```
/// use storefront_search_core::StoreDomain;
///
/// assert_eq!(StoreDomain::normalize("https://Shop.myshopify.com/").as_str(), "Shop.myshopify.com");
/// assert_eq!(StoreDomain::normalize("  shop.com  ").as_str(), "shop.com");
/// assert_eq!(StoreDomain::normalize("").as_str(), "");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct StoreDomain(String);

impl StoreDomain {
    /// Normalize a raw domain string.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        let without_scheme = SCHEME_PREFIXES
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .unwrap_or(trimmed);

        Self(without_scheme.trim().trim_matches('/').to_owned())
    }

    /// Whether the domain looks like a real host: non-empty and containing a `.`.
    #[must_use]
    pub fn is_plausible(&self) -> bool {
        !self.0.is_empty() && self.0.contains('.')
    }

    /// Returns the domain as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `StoreDomain` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StoreDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StoreDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
