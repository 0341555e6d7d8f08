//! Shop page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::Product;
use crate::error::Result;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Notice shown after an item has been added.
pub const ADDED_NOTICE: &str = "Item adicionado ao carrinho com sucesso!";

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    /// Formatted price, e.g. "R$ 6,50".
    pub price: String,
    /// Machine-readable price submitted with the form, e.g. "6.50".
    pub price_value: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.to_string(),
            price: product.price.display(),
            price_value: product.price.to_plain_string(),
        }
    }
}

/// Shop page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub added: Option<String>,
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    pub cart: CartView,
    pub notice: Option<&'static str>,
}

/// Display the shop page with the product cards and the cart.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate> {
    let products = state.catalog().products().iter().map(ProductView::from).collect();
    let cart = state.with_cart(|store| CartView::from(store.cart()))?;
    let notice = query.added.is_some().then_some(ADDED_NOTICE);

    Ok(HomeTemplate {
        products,
        cart,
        notice,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::catalog::Catalog;

    use super::*;

    fn page(notice: Option<&'static str>) -> String {
        HomeTemplate {
            products: Catalog::builtin().products().iter().map(ProductView::from).collect(),
            cart: CartView::empty(),
            notice,
        }
        .render()
        .unwrap()
    }

    #[test]
    fn test_home_lists_products() {
        let html = page(None);
        assert!(html.contains("Café Expresso"));
        assert!(html.contains("R$ 12,90"));
        assert!(html.contains("value=\"12.90\""));
        assert!(!html.contains(ADDED_NOTICE));
    }

    #[test]
    fn test_home_shows_added_notice() {
        assert!(page(Some(ADDED_NOTICE)).contains(ADDED_NOTICE));
    }
}
