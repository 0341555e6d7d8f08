//! Terminal rendering of the cart.

use std::fmt::Write as _;

use sacola_core::{Cart, CartEvent};

/// Render the cart as numbered lines followed by the total.
pub fn cart_text(cart: &Cart) -> String {
    let mut out = String::new();
    if cart.is_empty() {
        out.push_str("Carrinho vazio\n");
    }
    for (index, entry) in cart.entries().iter().enumerate() {
        let _ = writeln!(
            out,
            "[{index}] {} - {} x {} = {}",
            entry.name,
            entry.quantity,
            entry.unit_price,
            entry.line_total()
        );
    }
    let _ = write!(out, "Total: {}", cart.total());
    out
}

/// One-line summary of a change.
pub fn change_text(event: &CartEvent) -> String {
    match event {
        CartEvent::Added { name, quantity } => format!("Added {name} (now {quantity})"),
        CartEvent::Removed { index, entry } => format!("Removed [{index}] {}", entry.name),
        CartEvent::QuantityChanged { name, from, to } => format!("{name}: {from} -> {to}"),
        CartEvent::Cleared { removed } => format!("Cleared {removed} entries"),
    }
}

/// Print the cart to stdout.
#[allow(clippy::print_stdout)]
pub fn print_cart(cart: &Cart) {
    println!("{}", cart_text(cart));
}

/// Observer printing each change followed by the cart.
#[allow(clippy::print_stdout)]
pub fn print_change(event: &CartEvent, cart: &Cart) {
    println!("{}", change_text(event));
    println!("{}", cart_text(cart));
}

/// Print a single line to stdout.
#[allow(clippy::print_stdout)]
pub fn print_line(line: &str) {
    println!("{line}");
}
