//! Cart line and product snapshot types.

use medmart_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product as handed to the cart by a catalog page.
///
/// Built by [`crate::catalog::product_from_record`] or directly by callers
/// that already hold normalized data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Canonical product ID.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Unit price at the time the product was added.
    pub price: Price,
    /// Image URL, if the catalog has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Originating catalog record, carried through untouched.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub raw: Value,
}

impl ProductSnapshot {
    /// Create a snapshot with no image and no raw record.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            raw: Value::Null,
        }
    }

    /// Attach an image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// One product's entry in the cart.
///
/// This is also the persisted shape: the stored cart is a JSON array of
/// these, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Canonical product ID, unique within a cart.
    pub id: ProductId,
    /// Display name captured when the line was created.
    #[serde(default)]
    pub name: String,
    /// Unit price captured when the line was created.
    pub price: Price,
    /// Image URL captured when the line was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Originating catalog record.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub raw: Value,
    /// Units of this product, always at least one.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line from a product snapshot.
    #[must_use]
    pub fn new(product: ProductSnapshot, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            raw: product.raw,
            quantity,
        }
    }

    /// `price * quantity` for this line, or `None` if it overflows.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<rust_decimal::Decimal> {
        self.price.checked_times(self.quantity)
    }

    /// `price * quantity` for this line, saturating at `Decimal::MAX`.
    ///
    /// Lines held by a [`crate::CartStore`] never saturate.
    #[must_use]
    pub fn line_total(&self) -> rust_decimal::Decimal {
        self.checked_line_total().unwrap_or(rust_decimal::Decimal::MAX)
    }
}
