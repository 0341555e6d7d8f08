//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Shop page (`?added=1` shows the added notice)
//! GET  /health                 - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart items fragment
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/add               - Add item (303 to /?added=1, or fragment)
//! POST /cart/remove            - Remove item by position (303 to /, or fragment)
//! POST /cart/step              - Step quantity by +1/-1 (303 to /, or fragment)
//!
//! # Checkout
//! GET  /checkout/whatsapp      - Redirect to WhatsApp with the order message
//! GET  /checkout/pix           - Redirect to the Pix page with the total
//! GET  /pix                    - Pix payment page (`?valor=37.50`)
//!
//! # Assets
//! GET  /static/*               - Stylesheets
//! ```

pub mod cart;
pub mod home;
pub mod pix;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/step", post(cart::step))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/whatsapp", get(cart::checkout_whatsapp))
        .route("/pix", get(cart::checkout_pix))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .route("/pix", get(pix::pix))
}
