//! Storefront search proxy library.
//!
//! A small HTTP service that turns `GET /search?q=...` into a Shopify
//! Storefront API GraphQL query and returns a simplified product list.
//! The binary in `main.rs` only adds process setup on top of [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod search;
pub mod shopify;
pub mod state;
