//! CLI command implementations.
//!
//! Commands receive the process-wide [`medmart_storefront::CartStore`] from
//! `main` rather than opening their own.

pub mod cart;
pub mod catalog;
pub mod checkout;

use medmart_storefront::{CartError, CatalogError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Input was not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Input file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog record was unusable.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart rejected the mutation.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}
