//! The cart store: an owned cart with write-through persistence.
//!
//! [`CartStore`] is the only way the storefront and the CLI mutate a cart.
//! Every successful mutation is written to the backing [`KeyValueStore`]
//! immediately and then announced to subscribers, so a display can re-render
//! from the store instead of keeping its own copy of the quantities.

use std::fmt;

use crate::cart::{Cart, CartError};
use crate::storage::{KeyValueStore, StorageError};
use crate::types::{CartEntry, CartState, ItemName, Price, Quantity};

/// Storage key the cart is kept under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cartData";

/// A change that has just been applied to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Units of an item were added; `quantity` is the entry's new total.
    Added {
        name: ItemName,
        quantity: Quantity,
    },
    /// The entry at `index` was removed.
    Removed {
        index: usize,
        entry: CartEntry,
    },
    /// An entry's quantity changed.
    QuantityChanged {
        name: ItemName,
        from: Quantity,
        to: Quantity,
    },
    /// Every entry was removed.
    Cleared {
        removed: usize,
    },
}

impl CartEvent {
    /// Short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::Removed { .. } => "removed",
            Self::QuantityChanged { .. } => "quantity_changed",
            Self::Cleared { .. } => "cleared",
        }
    }
}

/// Callback invoked after every successful mutation.
pub type Observer = Box<dyn Fn(&CartEvent, &Cart) + Send>;

/// An owned cart bound to a storage backend.
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    key: String,
    observers: Vec<Observer>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open the cart stored under [`DEFAULT_CART_KEY`].
    #[must_use]
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DEFAULT_CART_KEY)
    }

    /// Open the cart stored under `key`.
    ///
    /// A missing value gives an empty cart. An unreadable or malformed value
    /// is logged and also gives an empty cart; opening never fails.
    #[must_use]
    pub fn open_with_key(storage: S, key: &str) -> Self {
        let cart = match storage.get(key) {
            Ok(Some(raw)) => Cart::from_json_or_empty(&raw),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::error!(key, error = %e, "failed to read stored cart, starting empty");
                Cart::new()
            }
        };
        tracing::debug!(key, entries = cart.len(), "cart loaded");

        Self {
            cart,
            storage,
            key: key.to_owned(),
            observers: Vec::new(),
        }
    }

    /// Register an observer called after every successful mutation.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&CartEvent, &Cart) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Add `quantity` units of an item.
    ///
    /// Merges into an existing entry of the same name. Returns the entry's
    /// quantity after the add.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the write fails; the cart in memory
    /// has still been updated.
    pub fn add_item(
        &mut self,
        name: ItemName,
        unit_price: Price,
        quantity: Quantity,
    ) -> Result<Quantity, CartError> {
        let merged = self.cart.add(name.clone(), unit_price, quantity);
        self.commit(&CartEvent::Added {
            name,
            quantity: merged,
        })?;
        Ok(merged)
    }

    /// Remove the entry at ordinal position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] (nothing written, nobody
    /// notified) if there is no such entry, or [`CartError::Storage`] if the
    /// write fails.
    pub fn remove_item(&mut self, index: usize) -> Result<CartEntry, CartError> {
        let entry = self.cart.remove(index).inspect_err(|e| {
            tracing::warn!(error = %e, "cart removal out of range");
        })?;
        self.commit(&CartEvent::Removed {
            index,
            entry: entry.clone(),
        })?;
        Ok(entry)
    }

    /// Move an entry's quantity by `delta`, clamped to `1..=99`.
    ///
    /// A step that hits a bound without changing the quantity is not written.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownItem`] if no entry has this name, or
    /// [`CartError::Storage`] if the write fails.
    pub fn step_quantity(&mut self, name: &str, delta: i64) -> Result<Quantity, CartError> {
        let (from, to) = self.cart.step(name, delta)?;
        self.quantity_changed(name, from, to)
    }

    /// Set an entry's quantity, clamped to `1..=99`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownItem`] if no entry has this name, or
    /// [`CartError::Storage`] if the write fails.
    pub fn set_quantity(&mut self, name: &str, value: i64) -> Result<Quantity, CartError> {
        let (from, to) = self.cart.set_quantity(name, value)?;
        self.quantity_changed(name, from, to)
    }

    fn quantity_changed(
        &mut self,
        name: &str,
        from: Quantity,
        to: Quantity,
    ) -> Result<Quantity, CartError> {
        if from == to {
            return Ok(to);
        }
        let name = self
            .cart
            .get(name)
            .map(|entry| entry.name.clone())
            .ok_or_else(|| CartError::UnknownItem(name.to_owned()))?;
        self.commit(&CartEvent::QuantityChanged { name, from, to })?;
        Ok(to)
    }

    /// Remove every entry. Returns how many entries were removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the write fails.
    pub fn clear(&mut self) -> Result<usize, CartError> {
        let removed = self.cart.clear();
        if removed > 0 {
            self.commit(&CartEvent::Cleared { removed })?;
        }
        Ok(removed)
    }

    /// Persist, then notify. Observers run even when the write fails.
    fn commit(&mut self, event: &CartEvent) -> Result<(), CartError> {
        let written = self.persist();
        if let Err(e) = &written {
            tracing::error!(key = %self.key, error = %e, "failed to persist cart");
        }
        for observer in &self.observers {
            observer(event, &self.cart);
        }
        written.map_err(CartError::from)
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let raw = self.cart.to_json()?;
        self.storage.set(&self.key, &raw)
    }
}

impl<S> CartStore<S> {
    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of unit price times quantity, computed now.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// Empty or non-empty.
    #[must_use]
    pub fn state(&self) -> CartState {
        self.cart.state()
    }

    /// Order summary for the messaging link.
    #[must_use]
    pub fn order_message(&self) -> String {
        self.cart.order_message()
    }

    /// Storage key the cart is written under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("storage", &self.storage)
            .field("key", &self.key)
            .field("observers", &self.observers.len())
            .finish()
    }
}
