//! Observable cart states.

use serde::{Deserialize, Serialize};

/// Whether the cart has anything in it.
///
/// Checkout affordances are only enabled in [`CartState::NonEmpty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CartState {
    #[default]
    Empty,
    NonEmpty,
}

impl CartState {
    /// Returns `true` if checkout can proceed.
    #[must_use]
    pub const fn can_checkout(self) -> bool {
        matches!(self, Self::NonEmpty)
    }
}

impl std::fmt::Display for CartState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::NonEmpty => write!(f, "non_empty"),
        }
    }
}
