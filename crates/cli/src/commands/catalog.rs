//! Catalog commands.

use std::path::Path;

use medmart_storefront::ProductSnapshot;
use medmart_storefront::catalog::products_from_listing;
use tracing::info;

use super::CommandError;

/// Normalize a JSON listing file and print the products it yields.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not JSON.
pub fn show(path: &str) -> Result<Vec<ProductSnapshot>, CommandError> {
    let contents = std::fs::read_to_string(Path::new(path))?;
    let listing: serde_json::Value = serde_json::from_str(&contents)?;

    let products = products_from_listing(&listing);
    info!(path, count = products.len(), "Normalized catalog listing");
    for product in &products {
        info!("  {} {} {}", product.id, product.name, product.price);
    }
    Ok(products)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_show_listing_file() {
        let path = std::env::temp_dir().join(format!("medmart-listing-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"{"data": [{"id": 1, "name": "A", "price": "2.00"}, {"id": 2}]}"#,
        )
        .unwrap();

        let products = show(path.to_str().unwrap()).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "A");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_show_missing_file() {
        assert!(matches!(
            show("/nonexistent/medmart/listing.json"),
            Err(CommandError::Io(_))
        ));
    }
}
