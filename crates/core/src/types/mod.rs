//! Core types for the storefront search proxy.
//!
//! This module provides type-safe wrappers for the few domain concepts the
//! proxy deals with.

pub mod domain;
pub mod price;
pub mod product;

pub use domain::StoreDomain;
pub use price::{Money, MoneyError};
pub use product::{ProductResult, SearchResponse};
