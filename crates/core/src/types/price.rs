//! Monetary amounts as reported by the Storefront API.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors that can occur when building a [`Money`] value from upstream data.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is not a number or a numeric string.
    #[error("amount is not numeric: {0}")]
    NonNumeric(String),
    /// The amount is a number `Decimal` cannot hold (too large or too precise).
    #[error("amount is out of range: {0}")]
    OutOfRange(String),
    /// The price node carries no currency code.
    #[error("currency code is missing")]
    MissingCurrencyCode,
}

/// A price with currency information.
///
/// The amount serializes as a JSON number; the currency code is whatever the
/// upstream reported (ISO 4217, e.g. `"USD"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create a new money value.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: String) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Build a money value from a loosely-typed JSON amount.
    ///
    /// Shopify's `Decimal` scalar arrives as a string (`"19.99"`), but plain
    /// JSON numbers are accepted too.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::NonNumeric`] if the amount cannot be read as a
    /// number, or [`MoneyError::OutOfRange`] if it is a finite number outside
    /// what [`Decimal`] can represent.
    pub fn from_json_amount(amount: &Value, currency_code: String) -> Result<Self, MoneyError> {
        let text = match amount {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return Err(MoneyError::NonNumeric(amount.to_string())),
        };

        match parse_decimal(&text) {
            Some(value) => Ok(Self::new(value, currency_code)),
            None if text.parse::<f64>().is_ok_and(f64::is_finite) => {
                Err(MoneyError::OutOfRange(amount.to_string()))
            }
            None => Err(MoneyError::NonNumeric(amount.to_string())),
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}
