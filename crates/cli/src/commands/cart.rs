//! Cart commands.

use medmart_core::ProductId;
use medmart_storefront::catalog::product_from_record;
use medmart_storefront::views::CartView;
use medmart_storefront::{CartStorage, CartStore};
use tracing::info;

use super::CommandError;

/// Print the cart and return the rendered view.
pub fn show<S: CartStorage>(store: &CartStore<S>) -> CartView {
    let view = CartView::from(store);

    if view.is_empty() {
        info!("Cart is empty");
        return view;
    }

    for item in &view.items {
        info!(
            "  {} x{} {} @ {} = {}",
            item.id, item.quantity, item.name, item.price, item.line_price
        );
    }
    info!("Items: {}", view.item_count);
    info!("Subtotal: {}", view.subtotal);
    view
}

/// Add a JSON catalog record to the cart.
///
/// # Errors
///
/// Returns an error if the JSON is invalid, the record cannot be normalized,
/// or the cart rejects the quantity.
pub fn add<S: CartStorage>(
    store: &mut CartStore<S>,
    product_json: &str,
    quantity: u32,
) -> Result<(), CommandError> {
    let record: serde_json::Value = serde_json::from_str(product_json)?;
    let product = product_from_record(&record)?;
    let id = product.id.clone();

    store.add_item(product, quantity)?;

    let line_quantity = store.line(&id).map_or(0, |line| line.quantity);
    info!(%id, quantity = line_quantity, "Added to cart");
    Ok(())
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns an error if the quantity does not fit a cart line.
pub fn update<S: CartStorage>(
    store: &mut CartStore<S>,
    id: &str,
    quantity: i64,
) -> Result<(), CommandError> {
    let id = ProductId::new(id);
    store.update_item_quantity(&id, quantity)?;

    match store.line(&id) {
        Some(line) => info!(%id, quantity = line.quantity, "Updated cart line"),
        None => info!(%id, "Product not in cart"),
    }
    Ok(())
}

/// Remove a line.
pub fn remove<S: CartStorage>(store: &mut CartStore<S>, id: &str) {
    let id = ProductId::new(id);
    store.remove_item(&id);
    info!(%id, remaining = store.cart_count(), "Removed from cart");
}

/// Empty the cart.
pub fn clear<S: CartStorage>(store: &mut CartStore<S>) {
    store.clear_cart();
    info!("Cart cleared");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use medmart_storefront::MemoryStorage;

    use super::*;

    fn store() -> CartStore<MemoryStorage> {
        CartStore::open(MemoryStorage::new(), "cart")
    }

    #[test]
    fn test_add_then_show() {
        let mut store = store();
        add(&mut store, r#"{"id": 7, "name": "X", "price": 100}"#, 1).unwrap();
        add(&mut store, r#"{"id": "7", "name": "X", "price": 100}"#, 2).unwrap();

        let view = show(&store);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$300.00");
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let mut store = store();
        assert!(matches!(
            add(&mut store, "not json", 1),
            Err(CommandError::Json(_))
        ));
        assert!(matches!(
            add(&mut store, r#"{"name": "X", "price": 1}"#, 1),
            Err(CommandError::Catalog(_))
        ));
        assert!(matches!(
            add(&mut store, r#"{"id": 1, "price": 1}"#, 0),
            Err(CommandError::Cart(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let mut store = store();
        add(&mut store, r#"{"id": 1, "price": 1}"#, 1).unwrap();
        add(&mut store, r#"{"id": 2, "price": 1}"#, 1).unwrap();

        update(&mut store, "1", 4).unwrap();
        assert_eq!(store.total_quantity(), 5);

        update(&mut store, "1", -1).unwrap();
        assert_eq!(store.cart_count(), 1);

        remove(&mut store, "2");
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut store = store();
        add(&mut store, r#"{"id": 1, "price": 1}"#, 1).unwrap();
        clear(&mut store);
        assert!(show(&store).is_empty());
    }
}
