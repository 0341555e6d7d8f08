//! Checkout link commands.

use sacola_core::{Cart, CheckoutError, CheckoutRedirector, PixCheckout, WhatsAppCheckout};
use thiserror::Error;

/// Errors that can occur building a checkout link.
#[derive(Debug, Error)]
pub enum CheckoutCommandError {
    /// Phone number or Pix page is invalid.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Nothing to check out.
    #[error("Cart is empty; add an item before checking out")]
    EmptyCart,
}

/// WhatsApp link carrying the order message.
pub fn whatsapp(cart: &Cart, phone: &str) -> Result<String, CheckoutCommandError> {
    link(&WhatsAppCheckout::new(phone)?, cart)
}

/// Pix page link carrying the total.
pub fn pix(cart: &Cart, page: &str) -> Result<String, CheckoutCommandError> {
    link(&PixCheckout::new(page)?, cart)
}

fn link(redirector: &impl CheckoutRedirector, cart: &Cart) -> Result<String, CheckoutCommandError> {
    redirector
        .checkout_url(cart)
        .ok_or(CheckoutCommandError::EmptyCart)
}
