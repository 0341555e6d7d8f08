//! Sacola Core - cart store library.
//!
//! This crate holds everything the storefront and CLI share:
//! - `storefront` - the shop page that renders the cart over HTTP
//! - `cli` - terminal tool working on the same stored cart
//!
//! # Architecture
//!
//! The cart is an explicitly owned [`CartStore`], never a global. It wraps a
//! pure [`Cart`] with a [`KeyValueStore`] backend (write-through after every
//! mutation) and a list of observers notified of each change.
//!
//! # Modules
//!
//! - [`types`] - Newtypes for prices, quantities, item names and cart state
//! - [`cart`] - The ordered cart, totals and the order message
//! - [`store`] - Persistence-backed cart store with change notifications
//! - [`storage`] - Key-value storage trait with memory and file backends
//! - [`checkout`] - WhatsApp and Pix link builders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod storage;
pub mod store;
pub mod types;

pub use cart::{Cart, CartError, ORDER_MESSAGE_HEADER};
pub use checkout::{CheckoutError, CheckoutRedirector, PixCheckout, WhatsAppCheckout};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartEvent, CartStore, DEFAULT_CART_KEY, Observer};
pub use types::*;
