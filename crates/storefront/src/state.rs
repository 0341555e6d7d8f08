//! Application state shared across handlers.

use std::sync::{Arc, Mutex};

use sacola_core::{CartStore, FileStore, KeyValueStore};

use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::error::AppError;

/// Storage backend behind the shared cart.
pub type CartStorage = Box<dyn KeyValueStore + Send>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. There is exactly one cart per
/// deployment; handlers reach it through [`AppState::with_cart`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Mutex<CartStore<CartStorage>>,
}

impl AppState {
    /// Create application state over an explicit storage backend.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, storage: CartStorage) -> Self {
        let mut cart = CartStore::open_with_key(storage, &config.cart_key);
        cart.subscribe(|event, cart| {
            tracing::info!(
                event = event.kind(),
                entries = cart.len(),
                items = cart.item_count(),
                total = %cart.total(),
                "cart updated"
            );
        });
        tracing::info!(entries = cart.cart().len(), "cart restored");

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Create application state from configuration, using file storage.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog file cannot be loaded.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };
        let storage: CartStorage = Box::new(FileStore::new(&config.data_dir));
        Ok(Self::new(config, catalog, storage))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Run `f` with exclusive access to the cart store.
    ///
    /// The lock is held only for the duration of `f`, which must not block.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if a previous holder panicked.
    pub fn with_cart<T>(
        &self,
        f: impl FnOnce(&mut CartStore<CartStorage>) -> T,
    ) -> Result<T, AppError> {
        let mut guard = self
            .inner
            .cart
            .lock()
            .map_err(|_| AppError::Internal("cart lock poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sacola_core::{DEFAULT_CART_KEY, ItemName, MemoryStore, Quantity};

    use super::*;

    #[test]
    fn test_restores_stored_cart() {
        let storage = MemoryStore::with_value(
            DEFAULT_CART_KEY,
            r#"[{"name":"Coffee","price":12.5,"quantity":2}]"#,
        );
        let state = AppState::new(
            StorefrontConfig::default(),
            Catalog::builtin(),
            Box::new(storage),
        );
        let total = state.with_cart(|store| store.total()).unwrap();
        assert_eq!(total.display(), "R$ 25,00");
    }

    #[test]
    fn test_clones_share_one_cart() {
        let state = AppState::new(
            StorefrontConfig::default(),
            Catalog::builtin(),
            Box::new(MemoryStore::new()),
        );
        let other = state.clone();
        state
            .with_cart(|store| {
                store.add_item(
                    ItemName::parse("Tea").unwrap(),
                    "3".parse().unwrap(),
                    Quantity::ONE,
                )
            })
            .unwrap()
            .unwrap();
        assert_eq!(other.with_cart(|store| store.cart().len()).unwrap(), 1);
    }

    #[test]
    fn test_from_config_uses_file_storage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = StorefrontConfig {
            data_dir: dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        };
        let state = AppState::from_config(config).unwrap();
        state
            .with_cart(|store| {
                store.add_item(
                    ItemName::parse("Tea").unwrap(),
                    "3".parse().unwrap(),
                    Quantity::ONE,
                )
            })
            .unwrap()
            .unwrap();
        assert!(dir.path().join("cartData.json").exists());
    }
}
