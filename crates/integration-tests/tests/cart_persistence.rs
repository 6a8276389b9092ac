//! Integration tests for cart persistence across reloads.
//!
//! Each test simulates a page reload by dropping one store and opening a new
//! one over the same directory.

use medmart_core::{Price, ProductId};
use medmart_integration_tests::TempStorageDir;
use medmart_storefront::catalog::product_from_record;
use medmart_storefront::{CartStorage, CartStore, Hydration, Phase, ProductSnapshot};
use rust_decimal::Decimal;
use serde_json::json;

const KEY: &str = "cart";

fn product(id: &str, cents: i64) -> ProductSnapshot {
    ProductSnapshot::new(id, format!("Item {id}"), Price::from_cents(cents).unwrap())
}

// =============================================================================
// Round Trip
// =============================================================================

#[test]
fn test_reload_restores_identical_state() {
    let dir = TempStorageDir::new();

    let mut store = CartStore::open(dir.storage(), KEY);
    let record = json!({
        "id": 501,
        "name": "Cough Syrup",
        "price": "8.75",
        "images": ["https://cdn.example.com/syrup.png"],
        "category": {"id": 3, "name": "Cold & Flu"}
    });
    store.add_item(product_from_record(&record).unwrap(), 2).unwrap();
    store.add_item(product("b", 1999), 1).unwrap();
    store.add_item(product("c", 50), 5).unwrap();
    store.update_item_quantity(&ProductId::new("c"), 3).unwrap();
    let before = store.lines().to_vec();
    drop(store);

    let mut reloaded = CartStore::new(dir.storage());
    assert_eq!(reloaded.phase(), Phase::Hydrating);
    assert_eq!(reloaded.hydrate(), Hydration::Restored(3));
    assert_eq!(reloaded.lines(), before.as_slice());
    assert_eq!(reloaded.subtotal(), Decimal::new(3899, 2));
}

#[test]
fn test_clear_survives_reload() {
    let dir = TempStorageDir::new();

    let mut store = CartStore::open(dir.storage(), KEY);
    store.add_item(product("a", 100), 1).unwrap();
    store.clear_cart();
    drop(store);

    let reloaded = CartStore::open(dir.storage(), KEY);
    assert!(reloaded.is_empty());
}

#[test]
fn test_keys_are_independent() {
    let dir = TempStorageDir::new();

    let mut us = CartStore::open(dir.storage(), "cart_us");
    us.add_item(product("a", 100), 1).unwrap();

    let eu = CartStore::open(dir.storage(), "cart_eu");
    assert!(eu.is_empty());
}

// =============================================================================
// Hydration Guard
// =============================================================================

#[test]
fn test_mutations_before_hydration_do_not_clobber_saved_cart() {
    let dir = TempStorageDir::new();

    let mut store = CartStore::open(dir.storage(), KEY);
    store.add_item(product("saved", 100), 2).unwrap();
    drop(store);

    // A fresh page mutates before its hydration read completes
    let mut page = CartStore::with_key(dir.storage(), KEY);
    page.clear_cart();
    assert_eq!(
        dir.storage().read(KEY).unwrap().map(|blob| blob.contains("saved")),
        Some(true)
    );

    assert_eq!(page.hydrate(), Hydration::Restored(1));
    assert_eq!(page.total_quantity(), 2);
}

#[test]
fn test_malformed_file_starts_empty_and_is_repaired() {
    let dir = TempStorageDir::new();
    std::fs::create_dir_all(dir.path()).unwrap();
    std::fs::write(dir.path().join("cart.json"), r#"{"id": 7, "quantity": 1}"#).unwrap();

    let mut store = CartStore::new(dir.storage());
    assert_eq!(store.hydrate(), Hydration::Discarded);
    assert_eq!(store.cart_count(), 0);

    store.add_item(product("7", 100), 1).unwrap();
    let blob = std::fs::read_to_string(dir.path().join("cart.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert!(value.is_array());
}

// =============================================================================
// Last Writer Wins
// =============================================================================

#[test]
fn test_two_tabs_last_writer_wins() {
    let dir = TempStorageDir::new();

    let mut tab_a = CartStore::open(dir.storage(), KEY);
    let mut tab_b = CartStore::open(dir.storage(), KEY);

    tab_a.add_item(product("a", 100), 1).unwrap();
    tab_b.add_item(product("b", 100), 1).unwrap();

    let reloaded = CartStore::open(dir.storage(), KEY);
    let ids: Vec<&str> = reloaded.lines().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["b"]);
}
