//! Error types for the storefront library.
//!
//! Each concern gets its own enum. None of these are surfaced to shoppers:
//! the cart degrades to session-only on storage failures, and catalog or
//! quantity errors are reported back to the calling view.

use medmart_core::{PriceError, ProductId};
use thiserror::Error;

/// Persistence collaborator failed.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blob does not fit in the configured quota.
    #[error("Quota exceeded: {len} bytes exceeds limit of {limit}")]
    QuotaExceeded {
        /// Size of the rejected blob.
        len: usize,
        /// Configured limit.
        limit: usize,
    },

    /// The key cannot be used by this backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Cart mutation was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Items must be added with a quantity of at least one.
    #[error("Invalid quantity {quantity} for product {id}")]
    InvalidQuantity {
        /// Product the caller tried to add.
        id: ProductId,
        /// Rejected quantity.
        quantity: i64,
    },

    /// The resulting line quantity does not fit in a `u32`.
    #[error("Quantity overflow for product {0}")]
    QuantityOverflow(ProductId),

    /// The resulting cart subtotal does not fit in a `Decimal`.
    #[error("Subtotal overflow for product {0}")]
    SubtotalOverflow(ProductId),
}

/// Catalog record could not be turned into a product snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The record is not a JSON object.
    #[error("Catalog record is not an object")]
    NotAnObject,

    /// The record has no usable `id`.
    #[error("Catalog record has no id")]
    MissingId,

    /// The record has no `price`.
    #[error("Catalog record {0} has no price")]
    MissingPrice(ProductId),

    /// The `price` field is present but unusable.
    #[error("Catalog record {id} has an invalid price: {source}")]
    InvalidPrice {
        /// Offending record.
        id: ProductId,
        /// Why the price was rejected.
        source: PriceError,
    },
}

/// Result type alias for cart mutations.
pub type Result<T> = std::result::Result<T, CartError>;
