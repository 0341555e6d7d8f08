//! Cart mutation commands.
//!
//! Each command changes the stored cart through the [`CartStore`], which
//! writes the file and then notifies the renderer.

use sacola_core::{CartEntry, CartError, CartStore, ItemName, KeyValueStore, Price, Quantity};

/// Add units of an item, returning the entry's new quantity.
pub fn add<S: KeyValueStore>(
    store: &mut CartStore<S>,
    name: ItemName,
    price: Price,
    quantity: Quantity,
) -> Result<Quantity, CartError> {
    tracing::info!(name = %name, price = %price, quantity = %quantity, "Adding item");
    store.add_item(name, price, quantity)
}

/// Remove the entry at `index`.
pub fn remove<S: KeyValueStore>(
    store: &mut CartStore<S>,
    index: usize,
) -> Result<CartEntry, CartError> {
    tracing::info!(index, "Removing item");
    store.remove_item(index)
}

/// Step an item's quantity by `delta`.
pub fn step<S: KeyValueStore>(
    store: &mut CartStore<S>,
    name: &str,
    delta: i64,
) -> Result<Quantity, CartError> {
    tracing::info!(name, delta, "Stepping quantity");
    store.step_quantity(name, delta)
}

/// Empty the cart, returning how many entries were removed.
pub fn clear<S: KeyValueStore>(store: &mut CartStore<S>) -> Result<usize, CartError> {
    let removed = store.clear()?;
    if removed == 0 {
        tracing::warn!("Cart was already empty");
    }
    Ok(removed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sacola_core::FileStore;

    use super::*;

    fn name(s: &str) -> ItemName {
        ItemName::parse(s).unwrap()
    }

    #[test]
    fn test_commands_persist_between_runs() {
        let dir = tempfile::tempdir().expect("tempdir");

        let mut store = CartStore::open(FileStore::new(dir.path()));
        add(&mut store, name("Coffee"), "12.50".parse().unwrap(), Quantity::ONE).unwrap();
        add(&mut store, name("Tea"), "3".parse().unwrap(), Quantity::ONE).unwrap();
        step(&mut store, "Coffee", 2).unwrap();

        // A later invocation sees the same cart.
        let mut store = CartStore::open(FileStore::new(dir.path()));
        assert_eq!(store.cart().len(), 2);
        assert_eq!(store.total().display(), "R$ 40,50");

        let removed = remove(&mut store, 1).unwrap();
        assert_eq!(removed.name.as_str(), "Tea");
        assert_eq!(clear(&mut store).unwrap(), 1);
        assert_eq!(clear(&mut store).unwrap(), 0);

        let store = CartStore::open(FileStore::new(dir.path()));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_remove_out_of_range_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = CartStore::open(FileStore::new(dir.path()));
        assert!(matches!(
            remove(&mut store, 0),
            Err(CartError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_step_unknown_item_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = CartStore::open(FileStore::new(dir.path()));
        assert!(matches!(
            step(&mut store, "Tea", 1),
            Err(CartError::UnknownItem(_))
        ));
    }
}
