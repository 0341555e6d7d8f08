//! Outbound checkout links.
//!
//! Checkout never leaves the page with money: it either opens a pre-filled
//! WhatsApp chat with the order summary or redirects to a static Pix page that
//! receives the total as `?valor=`.

use crate::cart::Cart;

/// Phone number orders are sent to when none is configured.
pub const DEFAULT_WHATSAPP_PHONE: &str = "5511999999999";

/// Pix page used when none is configured.
pub const DEFAULT_PIX_PAGE: &str = "pix.html";

/// Errors building a checkout redirector.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The phone number is empty or contains non-digits.
    #[error("phone number must be digits only (got {0:?})")]
    InvalidPhone(String),
    /// The Pix page location is empty.
    #[error("pix page cannot be empty")]
    EmptyPixPage,
}

/// Turns a cart into an external URL.
pub trait CheckoutRedirector {
    /// Target URL for this cart, or `None` when the cart is empty and checkout
    /// is disabled.
    fn checkout_url(&self, cart: &Cart) -> Option<String>;
}

/// Sends the order message to a WhatsApp number via `wa.me`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppCheckout {
    phone: String,
}

impl WhatsAppCheckout {
    /// Create a redirector for `phone` (country code included, digits only).
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidPhone`] for empty or non-numeric input.
    pub fn new(phone: &str) -> Result<Self, CheckoutError> {
        if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(CheckoutError::InvalidPhone(phone.to_owned()));
        }
        Ok(Self {
            phone: phone.to_owned(),
        })
    }

    /// The destination number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Link opening a chat with `message` pre-filled.
    #[must_use]
    pub fn message_url(&self, message: &str) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.phone,
            urlencoding::encode(message)
        )
    }
}

impl Default for WhatsAppCheckout {
    fn default() -> Self {
        Self {
            phone: DEFAULT_WHATSAPP_PHONE.to_owned(),
        }
    }
}

impl CheckoutRedirector for WhatsAppCheckout {
    fn checkout_url(&self, cart: &Cart) -> Option<String> {
        if !cart.state().can_checkout() {
            return None;
        }
        Some(self.message_url(&cart.order_message()))
    }
}

/// Redirects to a Pix payment page with the total as `valor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixCheckout {
    page: String,
}

impl PixCheckout {
    /// Create a redirector for `page` (relative or absolute URL).
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyPixPage`] if `page` is blank.
    pub fn new(page: &str) -> Result<Self, CheckoutError> {
        let page = page.trim();
        if page.is_empty() {
            return Err(CheckoutError::EmptyPixPage);
        }
        Ok(Self {
            page: page.to_owned(),
        })
    }

    /// The payment page location.
    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }
}

impl Default for PixCheckout {
    fn default() -> Self {
        Self {
            page: DEFAULT_PIX_PAGE.to_owned(),
        }
    }
}

impl CheckoutRedirector for PixCheckout {
    fn checkout_url(&self, cart: &Cart) -> Option<String> {
        if !cart.state().can_checkout() {
            return None;
        }
        let separator = if self.page.contains('?') { '&' } else { '?' };
        Some(format!(
            "{}{separator}valor={}",
            self.page,
            cart.total().to_plain_string()
        ))
    }
}
