//! Core types for Sacola.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod entry;
pub mod name;
pub mod price;
pub mod quantity;
pub mod status;

pub use entry::CartEntry;
pub use name::{ItemName, ItemNameError};
pub use price::{CURRENCY_SYMBOL, Price, PriceError};
pub use quantity::{Quantity, QuantityError};
pub use status::CartState;
