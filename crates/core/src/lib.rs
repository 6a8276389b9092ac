//! Medmart Core - Shared types library.
//!
//! This crate provides common types used across all Medmart components:
//! - `storefront` - Cart store, storage backends, and catalog adapters
//! - `cli` - Command-line driver for the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Canonical product IDs and non-negative prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
