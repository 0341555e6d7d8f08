//! A single cart line.

use serde::{Deserialize, Serialize};

use super::{ItemName, Price, Quantity};

/// One line item in the cart.
///
/// Serialized as `{"name": ..., "price": ..., "quantity": ...}`, the layout
/// stored carts already use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Item name, unique within a cart.
    pub name: ItemName,
    /// Price of one unit.
    #[serde(rename = "price")]
    pub unit_price: Price,
    /// Number of units.
    pub quantity: Quantity,
}

impl CartEntry {
    /// Create a new entry.
    #[must_use]
    pub const fn new(name: ItemName, unit_price: Price, quantity: Quantity) -> Self {
        Self {
            name,
            unit_price,
            quantity,
        }
    }

    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    /// The order message line for this entry, e.g. `- 3 x Coffee (R$ 12,50)`.
    #[must_use]
    pub fn order_line(&self) -> String {
        format!(
            "- {} x {} ({})",
            self.quantity,
            self.name,
            self.unit_price.display()
        )
    }
}
