//! Medmart Storefront library.
//!
//! Client-side cart state for the Medmart pharmacy storefront, together with
//! the collaborators it talks to: a key-value storage surface, the catalog
//! adapter that normalizes products before they reach the cart, and the view
//! models pages render.
//!
//! The cart is an owned [`cart::CartStore`] handed to views by reference, so
//! tests and pages can each build isolated instances.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod views;

pub use cart::{CartLine, CartStore, Hydration, Phase, ProductSnapshot};
pub use error::{CartError, CatalogError, StorageError};
pub use storage::{CartStorage, FileStorage, MemoryStorage};
