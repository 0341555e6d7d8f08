//! Integration tests for the cart store over file storage.
//!
//! These tests drive `CartStore` the way the storefront and CLI do: open,
//! mutate, drop, and reopen from the same data directory.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::{Arc, Mutex};

use sacola_core::{
    Cart, CartError, CartEvent, CartState, CartStore, CheckoutRedirector, DEFAULT_CART_KEY,
    FileStore, ItemName, KeyValueStore, PixCheckout, Price, Quantity, WhatsAppCheckout,
};

fn name(s: &str) -> ItemName {
    ItemName::parse(s).unwrap()
}

fn price(s: &str) -> Price {
    s.parse().unwrap()
}

fn qty(n: i64) -> Quantity {
    Quantity::new(n).unwrap()
}

fn reopen(dir: &std::path::Path) -> CartStore<FileStore> {
    CartStore::open(FileStore::new(dir))
}

// =============================================================================
// Merge and Totals
// =============================================================================

#[test]
fn test_coffee_scenario() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = reopen(dir.path());

    store.add_item(name("Coffee"), price("12.50"), qty(1)).unwrap();
    store.add_item(name("Coffee"), price("12.50"), qty(2)).unwrap();

    let entries = store.cart().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name.as_str(), "Coffee");
    assert_eq!(entries[0].unit_price, price("12.50"));
    assert_eq!(entries[0].quantity.get(), 3);
    assert_eq!(store.total(), price("37.50"));
    assert_eq!(store.total().display(), "R$ 37,50");
}

#[test]
fn test_repeated_adds_saturate_at_max() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = reopen(dir.path());

    for _ in 0..5 {
        store.add_item(name("Tea"), price("2"), qty(30)).unwrap();
    }

    assert_eq!(store.cart().len(), 1);
    assert_eq!(store.cart().entries()[0].quantity.get(), Quantity::MAX);
    assert_eq!(store.total(), price("198"));
}

#[test]
fn test_add_raises_total_by_price_times_quantity() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = reopen(dir.path());
    store.add_item(name("Coffee"), price("12.50"), qty(1)).unwrap();

    let before = store.total();
    store.add_item(name("Cake"), price("7.25"), qty(4)).unwrap();
    assert_eq!(store.total(), before + price("29"));
}

// =============================================================================
// Write-through Persistence
// =============================================================================

#[test]
fn test_every_mutation_is_visible_to_a_fresh_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = reopen(dir.path());

    store.add_item(name("Coffee"), price("12.50"), qty(1)).unwrap();
    assert_eq!(reopen(dir.path()).cart(), store.cart());

    store.add_item(name("Bread"), price("4.50"), qty(2)).unwrap();
    assert_eq!(reopen(dir.path()).cart(), store.cart());

    store.step_quantity("Coffee", 1).unwrap();
    assert_eq!(reopen(dir.path()).cart(), store.cart());

    store.set_quantity("Bread", 10).unwrap();
    assert_eq!(reopen(dir.path()).cart(), store.cart());

    store.remove_item(0).unwrap();
    assert_eq!(reopen(dir.path()).cart(), store.cart());

    store.clear().unwrap();
    assert!(reopen(dir.path()).cart().is_empty());
}

#[test]
fn test_stored_layout_is_compatible() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = reopen(dir.path());
    store.add_item(name("Coffee"), price("12.50"), qty(2)).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("cartData.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"name": "Coffee", "price": 12.5, "quantity": 2}])
    );
}

#[test]
fn test_loads_data_written_elsewhere() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut storage = FileStore::new(dir.path());
    storage
        .set(
            DEFAULT_CART_KEY,
            r#"[{"name":"Coffee","price":12.5,"quantity":1},{"name":"Tea","price":3,"quantity":4}]"#,
        )
        .unwrap();

    let store = CartStore::open(storage);
    assert_eq!(store.cart().len(), 2);
    assert_eq!(store.total(), price("24.50"));
    assert_eq!(store.state(), CartState::NonEmpty);
}

#[test]
fn test_round_trip_preserves_order() {
    let mut cart = Cart::new();
    for (n, p) in [("Zebra Cake", "1"), ("Apple", "2"), ("Mango", "3")] {
        cart.add(name(n), price(p), qty(1));
    }
    let restored = Cart::from_json(&cart.to_json().unwrap()).unwrap();
    let names: Vec<&str> = restored.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Zebra Cake", "Apple", "Mango"]);
    assert_eq!(restored, cart);
}

#[test]
fn test_prices_survive_reopen_exactly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = reopen(dir.path());
    store.add_item(name("Coffee"), price("19.99"), qty(3)).unwrap();
    store.add_item(name("Tray"), price("999999999999.99"), qty(1)).unwrap();
    store.add_item(name("Cake"), price("0.12345678901234567891"), qty(1)).unwrap();

    let reloaded = reopen(dir.path());
    assert_eq!(reloaded.cart(), store.cart());
    assert_eq!(reloaded.cart().entries()[2].unit_price, price("0.12"));
    assert!("12345678901234567.89".parse::<Price>().is_err());
}

// =============================================================================
// Malformed Data
// =============================================================================

#[test]
fn test_malformed_data_yields_empty_cart() {
    for raw in [
        "not json",
        r#"{"name":"Coffee"}"#,
        r#"[{"name":"Coffee","price":12.5}]"#,
        r#"[{"name":"Coffee","price":-1,"quantity":1}]"#,
        r#"[{"name":"Coffee","price":1.2345678901234568e16,"quantity":1}]"#,
        r#"[{"name":"Coffee","price":12.5,"quantity":0}]"#,
        r#"[{"name":"","price":12.5,"quantity":1}]"#,
        r#"[{"name":"A","price":1,"quantity":1},{"name":"A","price":2,"quantity":1}]"#,
    ] {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStore::new(dir.path());
        storage.set(DEFAULT_CART_KEY, raw).unwrap();

        let store = CartStore::open(storage);
        assert!(store.cart().is_empty(), "expected empty cart for {raw}");
        assert_eq!(store.state(), CartState::Empty);
    }
}

#[test]
fn test_malformed_data_is_replaced_on_next_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("cartData.json"), "garbage").unwrap();

    let mut store = reopen(dir.path());
    store.add_item(name("Tea"), price("3"), qty(1)).unwrap();

    let reloaded = reopen(dir.path());
    assert_eq!(reloaded.cart().len(), 1);
}

// =============================================================================
// State and Checkout
// =============================================================================

#[test]
fn test_state_transitions_and_checkout_availability() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = reopen(dir.path());
    let whatsapp = WhatsAppCheckout::default();
    let pix = PixCheckout::default();

    assert_eq!(store.state(), CartState::Empty);
    assert!(whatsapp.checkout_url(store.cart()).is_none());
    assert!(pix.checkout_url(store.cart()).is_none());

    store.add_item(name("Coffee"), price("12.50"), qty(3)).unwrap();
    assert_eq!(store.state(), CartState::NonEmpty);
    assert_eq!(
        pix.checkout_url(store.cart()).as_deref(),
        Some("pix.html?valor=37.50")
    );
    let url = whatsapp.checkout_url(store.cart()).unwrap();
    assert!(url.starts_with("https://wa.me/5511999999999?text="));

    store.remove_item(0).unwrap();
    assert_eq!(store.state(), CartState::Empty);
    assert!(whatsapp.checkout_url(store.cart()).is_none());
}

#[test]
fn test_remove_on_empty_cart_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = reopen(dir.path());

    assert!(matches!(
        store.remove_item(0),
        Err(CartError::IndexOutOfRange { index: 0, len: 0 })
    ));
    assert_eq!(store.state(), CartState::Empty);
    assert!(!dir.path().join("cartData.json").exists());
}

#[test]
fn test_stepper_clamps_to_bounds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = reopen(dir.path());
    store.add_item(name("Coffee"), price("12.50"), qty(2)).unwrap();

    assert_eq!(store.step_quantity("Coffee", -5).unwrap().get(), 1);
    assert_eq!(store.step_quantity("Coffee", 500).unwrap().get(), 99);
    assert_eq!(reopen(dir.path()).cart().entries()[0].quantity.get(), 99);
}

// =============================================================================
// Observers
// =============================================================================

#[test]
fn test_observers_see_each_change_after_it_is_stored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().to_path_buf();
    let seen: Arc<Mutex<Vec<(String, usize)>>> = Arc::default();

    let mut store = reopen(dir.path());
    let recorder = Arc::clone(&seen);
    store.subscribe(move |event, cart| {
        // The file already holds the cart the observer is shown.
        let stored = CartStore::open(FileStore::new(&path));
        assert_eq!(stored.cart(), cart);
        recorder
            .lock()
            .unwrap()
            .push((event.kind().to_string(), cart.len()));
    });

    store.add_item(name("Coffee"), price("12.50"), qty(1)).unwrap();
    store.add_item(name("Tea"), price("3"), qty(1)).unwrap();
    store.step_quantity("Tea", 1).unwrap();
    // Already at the bound: no change, no notification.
    store.step_quantity("Coffee", -1).unwrap();
    store.remove_item(0).unwrap();
    let _ = store.remove_item(5);
    store.clear().unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        [
            ("added".to_string(), 1),
            ("added".to_string(), 2),
            ("quantity_changed".to_string(), 2),
            ("removed".to_string(), 1),
            ("cleared".to_string(), 0),
        ]
    );
}

#[test]
fn test_removed_event_carries_entry() {
    let dir = tempfile::tempdir().expect("tempdir");
    let events: Arc<Mutex<Vec<CartEvent>>> = Arc::default();

    let mut store = reopen(dir.path());
    let recorder = Arc::clone(&events);
    store.subscribe(move |event, _| recorder.lock().unwrap().push(event.clone()));

    store.add_item(name("Coffee"), price("12.50"), qty(2)).unwrap();
    let removed = store.remove_item(0).unwrap();

    let events = events.lock().unwrap();
    assert_eq!(
        events.last(),
        Some(&CartEvent::Removed {
            index: 0,
            entry: removed
        })
    );
}

// =============================================================================
// Order Message
// =============================================================================

#[test]
fn test_order_message() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = reopen(dir.path());
    store.add_item(name("Coffee"), price("12.50"), qty(3)).unwrap();
    store.add_item(name("Pão de Queijo"), price("4.50"), qty(2)).unwrap();

    assert_eq!(
        store.order_message(),
        "Olá, gostaria de fazer o pedido:\n\
         - 3 x Coffee (R$ 12,50)\n\
         - 2 x Pão de Queijo (R$ 4,50)\n\
         Total: R$ 46,50"
    );
}
