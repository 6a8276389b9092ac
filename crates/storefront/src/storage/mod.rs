//! Key-value persistence for the cart.
//!
//! The cart is stored as a single JSON blob under one key. Backends only move
//! strings around; parsing and validation belong to the cart store.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - In-process map with an optional byte quota
//! - [`FileStorage`] - One file per key inside a directory

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Default key the cart is persisted under.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Maximum key length accepted by [`validate_key`].
pub const MAX_KEY_LENGTH: usize = 64;

/// A browser-style key-value storage surface.
pub trait CartStorage {
    /// Read the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value cannot be stored.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Check that a key is 1-64 characters of `[A-Za-z0-9_-]`.
///
/// Keys double as file names for [`FileStorage`].
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] otherwise.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LENGTH
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
