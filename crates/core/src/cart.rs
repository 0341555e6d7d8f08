//! The ordered cart and its pure operations.
//!
//! [`Cart`] knows nothing about storage or observers; [`crate::CartStore`]
//! wraps it with write-through persistence and change notifications.

use serde::{Deserialize, Serialize};

use crate::storage::StorageError;
use crate::types::{CartEntry, CartState, ItemName, Price, Quantity};

/// First line of the order message.
pub const ORDER_MESSAGE_HEADER: &str = "Olá, gostaria de fazer o pedido:";

/// Errors returned by cart operations.
#[derive(thiserror::Error, Debug)]
pub enum CartError {
    /// A removal addressed a position past the end of the cart.
    #[error("no cart entry at index {index} (cart has {len} entries)")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of entries in the cart.
        len: usize,
    },
    /// No entry with this name exists.
    #[error("no cart entry named {0:?}")]
    UnknownItem(String),
    /// The mutation was applied in memory but could not be persisted.
    #[error("failed to persist cart: {0}")]
    Storage(#[from] StorageError),
}

/// Ordered sequence of cart entries, at most one per name.
///
/// Insertion order is display order. The total is computed on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empty or non-empty.
    #[must_use]
    pub fn state(&self) -> CartState {
        if self.is_empty() {
            CartState::Empty
        } else {
            CartState::NonEmpty
        }
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.name.as_str() == name)
    }

    /// Add units of an item.
    ///
    /// An existing entry with the same name has its quantity increased
    /// (saturating at [`Quantity::MAX`]) and keeps its original unit price;
    /// otherwise a new entry is appended. Returns the entry's new quantity.
    pub fn add(&mut self, name: ItemName, unit_price: Price, quantity: Quantity) -> Quantity {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == name) {
            let merged = match entry.quantity.checked_add(quantity) {
                Some(merged) => merged,
                None => {
                    tracing::debug!(name = %entry.name, "cart quantity capped at maximum");
                    entry.quantity.saturating_add(quantity)
                }
            };
            entry.quantity = merged;
            return merged;
        }
        self.entries.push(CartEntry::new(name, unit_price, quantity));
        quantity
    }

    /// Remove the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] without touching the cart if
    /// `index` is past the end.
    pub fn remove(&mut self, index: usize) -> Result<CartEntry, CartError> {
        if index >= self.entries.len() {
            return Err(CartError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Move an entry's quantity by `delta`, clamped to `1..=99`.
    ///
    /// Returns the previous and the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownItem`] if no entry is named `name`.
    pub fn step(&mut self, name: &str, delta: i64) -> Result<(Quantity, Quantity), CartError> {
        let entry = self.entry_mut(name)?;
        let before = entry.quantity;
        entry.quantity = before.step(delta);
        Ok((before, entry.quantity))
    }

    /// Set an entry's quantity, clamped to `1..=99`.
    ///
    /// Returns the previous and the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownItem`] if no entry is named `name`.
    pub fn set_quantity(
        &mut self,
        name: &str,
        value: i64,
    ) -> Result<(Quantity, Quantity), CartError> {
        let entry = self.entry_mut(name)?;
        let before = entry.quantity;
        entry.quantity = Quantity::clamped(value);
        Ok((before, entry.quantity))
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut CartEntry, CartError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.name.as_str() == name)
            .ok_or_else(|| CartError::UnknownItem(name.to_owned()))
    }

    /// Remove every entry, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// Sum of unit price times quantity over all entries.
    #[must_use]
    pub fn total(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.entries
            .iter()
            .map(|entry| u32::from(entry.quantity))
            .sum()
    }

    /// Human-readable order summary, one line per entry, ending in the total.
    #[must_use]
    pub fn order_message(&self) -> String {
        let mut lines = Vec::with_capacity(self.entries.len() + 2);
        lines.push(ORDER_MESSAGE_HEADER.to_owned());
        lines.extend(self.entries.iter().map(CartEntry::order_line));
        lines.push(format!("Total: {}", self.total().display()));
        lines.join("\n")
    }

    /// Serialize to the stored JSON layout.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the stored JSON layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON, an entry violates a
    /// field invariant, or two entries share a name.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Parse stored JSON, falling back to an empty cart.
    ///
    /// Any parse failure discards the whole load and is logged.
    #[must_use]
    pub fn from_json_or_empty(raw: &str) -> Self {
        Self::from_json(raw).unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to load stored cart, starting empty");
            Self::new()
        })
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<CartEntry>::deserialize(deserializer)?;
        for (i, entry) in entries.iter().enumerate() {
            if entries
                .iter()
                .skip(i + 1)
                .any(|other| other.name == entry.name)
            {
                return Err(serde::de::Error::custom(format!(
                    "duplicate cart entry {:?}",
                    entry.name.as_str()
                )));
            }
        }
        Ok(Self { entries })
    }
}
