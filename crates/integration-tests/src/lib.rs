//! Integration tests for Sacola.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sacola-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart store behaviour over file storage, across reopenings
//! - `storefront_routes` - Storefront router driven in-process with `tower::ServiceExt::oneshot`
//!
//! No server or network is needed; each test gets its own temporary data
//! directory.

#![cfg_attr(not(test), forbid(unsafe_code))]
