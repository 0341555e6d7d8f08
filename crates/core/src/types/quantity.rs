//! Cart line quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("quantity must be between {min} and {max} (got {got})", min = Quantity::MIN, max = Quantity::MAX)]
pub struct QuantityError {
    /// The rejected value.
    pub got: i64,
}

/// Number of units of one item in the cart.
///
/// Always within `1..=99`. Arithmetic saturates at the bounds instead of
/// failing, which is what the quantity stepper needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Quantity(u8);

impl Quantity {
    /// Smallest quantity a cart line can hold.
    pub const MIN: u8 = 1;
    /// Largest quantity a cart line can hold.
    pub const MAX: u8 = 99;
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError`] if `value` is outside `1..=99`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(QuantityError { got: value })
    }

    /// Create a quantity, clamping `value` into `1..=99`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        // The clamp above guarantees the value fits.
        Self(u8::try_from(bounded).unwrap_or(Self::MAX))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Add another quantity, stopping at [`Quantity::MAX`].
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        self.checked_add(other).unwrap_or(Self(Self::MAX))
    }

    /// Add another quantity, or `None` if the sum is above [`Quantity::MAX`].
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Self::new(i64::from(self.0) + i64::from(other.0)).ok()
    }

    /// Move by `delta` units, staying within `1..=99`.
    #[must_use]
    pub fn step(self, delta: i64) -> Self {
        Self::clamped(i64::from(self.0).saturating_add(delta))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u8 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        Self::from(quantity.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Quantity::new(0).is_err());
        assert!(Quantity::new(-4).is_err());
        assert!(Quantity::new(100).is_err());
        assert!(Quantity::new(1000).is_err());
        assert_eq!(Quantity::new(1).unwrap().get(), 1);
        assert_eq!(Quantity::new(99).unwrap().get(), 99);
    }

    #[test]
    fn test_error_message() {
        let err = Quantity::new(0).unwrap_err();
        assert_eq!(err.to_string(), "quantity must be between 1 and 99 (got 0)");
    }

    #[test]
    fn test_step_clamps_at_bounds() {
        let one = Quantity::ONE;
        assert_eq!(one.step(-1), one);
        assert_eq!(one.step(i64::MIN), one);

        let max = Quantity::new(99).unwrap();
        assert_eq!(max.step(1), max);
        assert_eq!(max.step(i64::MAX), max);

        assert_eq!(Quantity::new(5).unwrap().step(-2).get(), 3);
    }

    #[test]
    fn test_saturating_add() {
        let a = Quantity::new(60).unwrap();
        let b = Quantity::new(50).unwrap();
        assert_eq!(a.saturating_add(b).get(), Quantity::MAX);
        assert_eq!(Quantity::ONE.saturating_add(Quantity::ONE).get(), 2);
    }

    #[test]
    fn test_checked_add() {
        let a = Quantity::new(49).unwrap();
        assert_eq!(a.checked_add(Quantity::new(50).unwrap()).unwrap().get(), 99);
        assert!(a.checked_add(Quantity::new(51).unwrap()).is_none());
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        assert_eq!(serde_json::from_str::<Quantity>("3").unwrap().get(), 3);
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("150").is_err());
        assert_eq!(serde_json::to_string(&Quantity::ONE).unwrap(), "1");
    }
}
