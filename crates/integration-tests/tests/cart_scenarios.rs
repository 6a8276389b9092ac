//! End-to-end cart scenarios: catalog listing to cart to checkout.

use medmart_core::ProductId;
use medmart_storefront::catalog::products_from_listing;
use medmart_storefront::session::AuthSession;
use medmart_storefront::views::{CartView, CheckoutRedirect, checkout_redirect};
use medmart_storefront::{CartStore, MemoryStorage};
use rust_decimal::Decimal;
use serde_json::json;

#[test]
fn test_listing_to_checkout() {
    // Deals endpoint uses numeric ids, category endpoint uses strings
    let deals = json!({"products": [
        {"id": 10, "name": "Vitamin D", "price": 12.5, "image": "/img/d.png"},
        {"id": 11, "name": "Zinc", "price": "6.00"}
    ]});
    let category = json!([
        {"id": "10", "title": "Vitamin D 1000IU", "price": 15},
        {"id": "12", "name": "Broken", "price": -1}
    ]);

    let mut store = CartStore::open(MemoryStorage::new(), "cart");
    for product in products_from_listing(&deals) {
        store.add_item(product, 1).unwrap();
    }
    for product in products_from_listing(&category) {
        store.add_item(product, 2).unwrap();
    }

    // "10" merged, keeps first snapshot; "12" was rejected by the adapter
    assert_eq!(store.cart_count(), 2);
    let vitamin = store.line(&ProductId::new("10")).unwrap();
    assert_eq!(vitamin.quantity, 3);
    assert_eq!(vitamin.name, "Vitamin D");
    assert_eq!(store.subtotal(), Decimal::new(4350, 2));

    let view = CartView::from(&store);
    assert_eq!(view.subtotal, "$43.50");
    assert_eq!(view.item_count, 4);

    assert_eq!(checkout_redirect(&view, None), CheckoutRedirect::Login);
    let session = AuthSession::from_cookie_header("mm_session=tok", "mm_session");
    assert_eq!(
        checkout_redirect(&view, session.as_ref()),
        CheckoutRedirect::Checkout
    );
}

#[test]
fn test_add_bump_then_zero_out() {
    let mut store = CartStore::open(MemoryStorage::new(), "cart");
    let x = medmart_storefront::catalog::product_from_record(
        &json!({"id": "7", "name": "X", "price": 100}),
    )
    .unwrap();

    store.add_item(x.clone(), 1).unwrap();
    assert_eq!(store.cart_count(), 1);
    assert_eq!(store.subtotal(), Decimal::from(100));

    store.add_item(x, 2).unwrap();
    assert_eq!(store.line(&ProductId::new("7")).unwrap().quantity, 3);
    assert_eq!(store.subtotal(), Decimal::from(300));

    store.update_item_quantity(&ProductId::new("7"), 0).unwrap();
    assert_eq!(store.cart_count(), 0);
    assert_eq!(store.subtotal(), Decimal::ZERO);
    assert_eq!(store.storage().get("cart"), Some("[]"));
}

#[test]
fn test_object_blob_hydrates_empty() {
    let storage = MemoryStorage::new().with_entry("cart", r#"{"7": {"quantity": 1}}"#);
    let store = CartStore::open(storage, "cart");
    assert_eq!(store.cart_count(), 0);
}
