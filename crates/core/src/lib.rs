//! Storefront Search Core - Shared types library.
//!
//! This crate provides the types shared by the search proxy and its tests:
//! - the normalized store domain the proxy talks to
//! - the simplified product shape returned to callers
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Store domains, money values, and search results

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
