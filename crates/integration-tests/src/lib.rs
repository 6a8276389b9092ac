//! Integration tests for Medmart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p medmart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Reload behavior against real files
//! - `cart_scenarios` - End-to-end catalog to cart to checkout flows
//!
//! Helpers here give each test its own storage directory so tests can run in
//! parallel.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use medmart_storefront::FileStorage;

/// A uniquely named directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TempStorageDir {
    path: PathBuf,
}

impl TempStorageDir {
    /// Reserve a fresh directory path. Nothing is created until a write.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: std::env::temp_dir().join(format!("medmart-it-{}", uuid::Uuid::new_v4())),
        }
    }

    /// Directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File storage rooted at this directory.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.path)
    }
}

impl Default for TempStorageDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempStorageDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
