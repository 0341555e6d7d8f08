//! Cart route handlers.
//!
//! Forms post here and are answered with a `303 See Other` back to the shop
//! page. Requests sent by HTMX (`HX-Request: true`) get the cart fragment
//! instead, with an `HX-Trigger: cart-updated` header.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use sacola_core::{Cart, CartEntry, CartError, CheckoutRedirector, ItemName, Price, Quantity};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Query flag telling the shop page to show the "added" notice.
pub const ADDED_REDIRECT: &str = "/?added=1";

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub index: usize,
    pub name: String,
    pub quantity: u8,
    pub price: String,
    pub line_price: String,
    pub at_min: bool,
    pub at_max: bool,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
    pub can_checkout: bool,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .entries()
                .iter()
                .enumerate()
                .map(|(index, entry)| CartItemView::new(index, entry))
                .collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
            can_checkout: cart.state().can_checkout(),
        }
    }
}

impl CartItemView {
    fn new(index: usize, entry: &CartEntry) -> Self {
        Self {
            index,
            name: entry.name.to_string(),
            quantity: entry.quantity.get(),
            price: entry.unit_price.display(),
            line_price: entry.line_total().display(),
            at_min: entry.quantity.get() == Quantity::MIN,
            at_max: entry.quantity.get() == Quantity::MAX,
        }
    }
}

/// Add to cart form data.
///
/// Every field is optional at the wire level so that a form missing one is
/// answered with a clear 400 instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct AddToCartForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub product_id: Option<String>,
    pub quantity: Option<String>,
}

/// A validated add request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub name: ItemName,
    pub price: Price,
    pub quantity: Quantity,
}

impl AddToCartForm {
    /// Check that the request carries a name, a positive price and a product id.
    ///
    /// Quantity defaults to one and is clamped to the cart's bounds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] describing the first problem found.
    pub fn validate(self) -> Result<AddRequest> {
        let missing = |field: &str| AppError::BadRequest(format!("missing {field}"));

        let name = self.name.filter(|s| !s.trim().is_empty()).ok_or_else(|| missing("name"))?;
        let price = self.price.filter(|s| !s.trim().is_empty()).ok_or_else(|| missing("price"))?;
        self.product_id
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| missing("product_id"))?;

        let name = ItemName::parse(&name).map_err(|e| AppError::BadRequest(e.to_string()))?;
        let price: Price = price
            .parse()
            .map_err(|e: sacola_core::PriceError| AppError::BadRequest(e.to_string()))?;
        if price.is_zero() {
            return Err(AppError::BadRequest("price must be greater than zero".to_string()));
        }

        let quantity = match self.quantity.as_deref().map(str::trim) {
            None | Some("") => Quantity::ONE,
            Some(raw) => raw
                .parse::<i64>()
                .map(Quantity::clamped)
                .map_err(|_| AppError::BadRequest(format!("invalid quantity {raw:?}")))?,
        };

        Ok(AddRequest {
            name,
            price,
            quantity,
        })
    }
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Quantity stepper form data.
#[derive(Debug, Deserialize)]
pub struct StepQuantityForm {
    pub name: String,
    pub delta: i64,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Answer a cart mutation: fragment for HTMX, redirect otherwise.
fn mutation_response(headers: &HeaderMap, cart: CartView, redirect: &str) -> Response {
    if is_htmx(headers) {
        (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate { cart },
        )
            .into_response()
    } else {
        Redirect::to(redirect).into_response()
    }
}

/// Cart fragment.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<CartItemsTemplate> {
    let cart = state.with_cart(|store| CartView::from(store.cart()))?;
    Ok(CartItemsTemplate { cart })
}

/// Cart count badge fragment.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<CartCountTemplate> {
    let count = state.with_cart(|store| store.cart().item_count())?;
    Ok(CartCountTemplate { count })
}

/// Add item to cart.
///
/// Rejects requests missing a name, price or product id before they reach the
/// cart.
#[instrument(skip(state, headers))]
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let request = form.validate()?;
    add_breadcrumb("cart", "Added item", Some(&[("name", request.name.as_str())]));

    let cart = state.with_cart(|store| {
        store
            .add_item(request.name, request.price, request.quantity)
            .map(|_| CartView::from(store.cart()))
    })??;

    Ok(mutation_response(&headers, cart, ADDED_REDIRECT))
}

/// Remove item from cart by position.
///
/// An out-of-range position is logged and otherwise ignored, so a stale page
/// cannot remove the wrong line.
#[instrument(skip(state, headers))]
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let cart = state.with_cart(|store| match store.remove_item(form.index) {
        Ok(entry) => {
            add_breadcrumb("cart", "Removed item", Some(&[("name", entry.name.as_str())]));
            Ok(CartView::from(store.cart()))
        }
        Err(CartError::IndexOutOfRange { .. }) => Ok(CartView::from(store.cart())),
        Err(e) => Err(e),
    })??;

    Ok(mutation_response(&headers, cart, "/"))
}

/// Step an item's quantity up or down.
#[instrument(skip(state, headers))]
pub async fn step(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<StepQuantityForm>,
) -> Result<Response> {
    let cart = state.with_cart(|store| {
        store
            .step_quantity(&form.name, form.delta)
            .map(|_| CartView::from(store.cart()))
    })??;

    Ok(mutation_response(&headers, cart, "/"))
}

/// Redirect to WhatsApp with the order message, or back to the page when the
/// cart is empty.
#[instrument(skip(state))]
pub async fn checkout_whatsapp(State(state): State<AppState>) -> Result<Redirect> {
    let url = state.with_cart(|store| state.config().whatsapp.checkout_url(store.cart()))?;
    Ok(checkout_redirect(url, "whatsapp"))
}

/// Redirect to the Pix page with the total, or back to the page when the cart
/// is empty.
#[instrument(skip(state))]
pub async fn checkout_pix(State(state): State<AppState>) -> Result<Redirect> {
    let url = state.with_cart(|store| state.config().pix.checkout_url(store.cart()))?;
    Ok(checkout_redirect(url, "pix"))
}

fn checkout_redirect(url: Option<String>, channel: &str) -> Redirect {
    match url {
        Some(url) => {
            tracing::info!(channel, "checkout started");
            add_breadcrumb("checkout", "Checkout started", Some(&[("channel", channel)]));
            Redirect::to(&url)
        }
        None => {
            tracing::warn!(channel, "checkout attempted with an empty cart");
            Redirect::to("/")
        }
    }
}
