//! Products offered on the shop page.
//!
//! The catalog only feeds the add-to-cart forms. The cart never checks items
//! against it.

use std::path::Path;

use sacola_core::{ItemName, Price};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has no products")]
    Empty,
    #[error("duplicate product id {0:?}")]
    DuplicateId(String),
}

/// A product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier, used for form element ids.
    pub id: String,
    /// Name shown on the card and used as the cart entry name.
    pub name: ItemName,
    /// Unit price.
    pub price: Price,
}

/// Ordered list of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The catalog shipped with the storefront.
    #[must_use]
    pub fn builtin() -> Self {
        let products = [
            ("cafe-expresso", "Café Expresso", 650),
            ("pao-de-queijo", "Pão de Queijo", 450),
            ("bolo-de-cenoura", "Bolo de Cenoura", 1290),
            ("brigadeiro", "Brigadeiro", 300),
        ]
        .into_iter()
        .filter_map(|(id, name, cents)| {
            Some(Product {
                id: id.to_string(),
                name: ItemName::parse(name).ok()?,
                price: Price::from_cents(cents),
            })
        })
        .collect();
        Self { products }
    }

    /// Parse a JSON array of `{id, name, price}` objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid, empty, or repeats an id.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(raw)?;
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, product) in products.iter().enumerate() {
            if products.iter().skip(i + 1).any(|p| p.id == product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.products().len(), 4);
        let cafe = catalog.products().first().unwrap();
        assert_eq!(cafe.id, "cafe-expresso");
        assert_eq!(cafe.price.display(), "R$ 6,50");
    }

    #[test]
    fn test_from_json() {
        let catalog =
            Catalog::from_json(r#"[{"id":"coffee","name":"Coffee","price":12.5}]"#).unwrap();
        let [coffee] = catalog.products() else {
            panic!("expected one product");
        };
        assert_eq!(coffee.id, "coffee");
        assert_eq!(coffee.name.as_str(), "Coffee");
    }

    #[test]
    fn test_from_json_rejects_bad_catalogs() {
        assert!(matches!(Catalog::from_json("[]"), Err(CatalogError::Empty)));
        assert!(matches!(
            Catalog::from_json(
                r#"[{"id":"a","name":"A","price":1},{"id":"a","name":"B","price":2}]"#
            ),
            Err(CatalogError::DuplicateId(id)) if id == "a"
        ));
        assert!(matches!(
            Catalog::from_json(r#"[{"id":"a","name":"A","price":-1}]"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            Catalog::load(&dir.path().join("nope.json")),
            Err(CatalogError::Io(_))
        ));
    }
}
