//! Client-side cart state.
//!
//! [`CartStore`] owns the ordered list of [`CartLine`]s and mirrors it to a
//! [`CartStorage`] backend. Views receive the store by reference; there is no
//! global cart.
//!
//! # Lifecycle
//!
//! A store starts in [`Phase::Hydrating`] with an empty cart. [`CartStore::hydrate`]
//! reads the persisted blob once and moves to [`Phase::Ready`]. Mutations are
//! accepted in both phases, but nothing is written to storage until the store
//! is ready, so an empty startup state can never clobber a saved cart.

pub mod line;

use std::collections::HashSet;

use medmart_core::{Price, ProductId};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, trace, warn};

pub use line::{CartLine, ProductSnapshot};

use crate::error::{CartError, Result};
use crate::storage::{CartStorage, DEFAULT_CART_KEY};

/// Hydration state of a [`CartStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Persisted state has not been read yet; writes are suppressed.
    Hydrating,
    /// Persisted state has been read (or found unusable); writes are live.
    Ready,
}

/// Outcome of [`CartStore::hydrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hydration {
    /// A well-formed cart with this many lines replaced the in-memory state.
    Restored(usize),
    /// Nothing was stored under the key.
    Empty,
    /// The stored blob was malformed and ignored.
    Discarded,
    /// The backend could not be read.
    Unavailable,
    /// The store had already hydrated; nothing was read.
    AlreadyReady,
}

/// Cart state mirrored to a storage backend.
#[derive(Debug)]
pub struct CartStore<S> {
    lines: Vec<CartLine>,
    phase: Phase,
    storage: S,
    key: String,
}

impl<S: CartStorage> CartStore<S> {
    /// Create an empty, not yet hydrated store using the default key.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    /// Create an empty, not yet hydrated store persisting under `key`.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            phase: Phase::Hydrating,
            storage,
            key: key.into(),
        }
    }

    /// Create a store and hydrate it immediately.
    #[must_use]
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self::with_key(storage, key);
        store.hydrate();
        store
    }

    /// Load persisted state. Runs at most once per store.
    ///
    /// A well-formed blob replaces whatever is in memory. An absent,
    /// unreadable, or malformed blob leaves memory untouched and is not
    /// repaired in storage until the next mutation.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn hydrate(&mut self) -> Hydration {
        if self.phase == Phase::Ready {
            return Hydration::AlreadyReady;
        }

        let outcome = match self.storage.read(&self.key) {
            Ok(Some(blob)) => match parse_lines(&blob) {
                Some(lines) => {
                    let count = lines.len();
                    self.lines = lines;
                    Hydration::Restored(count)
                }
                None => {
                    warn!("Discarding malformed persisted cart");
                    Hydration::Discarded
                }
            },
            Ok(None) => Hydration::Empty,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart");
                Hydration::Unavailable
            }
        };

        self.phase = Phase::Ready;
        info!(?outcome, lines = self.lines.len(), "Cart hydrated");
        outcome
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing line with the same ID has its quantity bumped and keeps its
    /// position and originally captured name, price and image. Otherwise a new
    /// line is appended.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`] if `quantity` is zero
    /// - [`CartError::QuantityOverflow`] if the merged quantity exceeds `u32::MAX`
    /// - [`CartError::SubtotalOverflow`] if the cart subtotal would overflow
    pub fn add_item(&mut self, product: ProductSnapshot, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity {
                id: product.id,
                quantity: 0,
            });
        }

        let (price, merged) = match self.line(&product.id) {
            Some(line) => (
                line.price,
                line.quantity
                    .checked_add(quantity)
                    .ok_or_else(|| CartError::QuantityOverflow(product.id.clone()))?,
            ),
            None => (product.price, quantity),
        };

        if !self.subtotal_fits(&product.id, price, merged) {
            return Err(CartError::SubtotalOverflow(product.id));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.id == product.id) {
            line.quantity = merged;
            debug!(id = %line.id, quantity = line.quantity, "Merged into existing cart line");
        } else {
            debug!(id = %product.id, quantity, "Appended cart line");
            self.lines.push(CartLine::new(product, quantity));
        }

        self.persist();
        Ok(())
    }

    /// Set a line's quantity in place. Zero or below removes the line.
    ///
    /// Unknown IDs are ignored, whatever the quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::QuantityOverflow`] if `quantity` exceeds `u32::MAX`
    /// - [`CartError::SubtotalOverflow`] if the cart subtotal would overflow
    pub fn update_item_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            self.remove_item(id);
            return Ok(());
        }

        let Some(price) = self.line(id).map(|l| l.price) else {
            debug!(%id, "Update for unknown cart line ignored");
            self.persist();
            return Ok(());
        };

        let quantity =
            u32::try_from(quantity).map_err(|_| CartError::QuantityOverflow(id.clone()))?;

        if !self.subtotal_fits(id, price, quantity) {
            return Err(CartError::SubtotalOverflow(id.clone()));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| &l.id == id) {
            line.quantity = quantity;
            debug!(%id, quantity, "Updated cart line quantity");
        }

        self.persist();
        Ok(())
    }

    /// Drop a line, keeping the order of the rest. Unknown IDs are ignored.
    pub fn remove_item(&mut self, id: &ProductId) {
        let before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        debug!(%id, removed = before != self.lines.len(), "Removed cart line");
        self.persist();
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        debug!("Cleared cart");
        self.persist();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by product ID.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Whether a product is in the cart.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.line(id).is_some()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn cart_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `price * quantity` over all lines.
    ///
    /// Mutations and hydration keep this within `Decimal` range, so the
    /// saturating fallback is never reached.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        checked_subtotal(&self.lines).unwrap_or(Decimal::MAX)
    }

    /// Current hydration phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether hydration has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Key the cart is persisted under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return its storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Whether the subtotal stays in range with line `id` set to `quantity`
    /// units at `price`.
    fn subtotal_fits(&self, id: &ProductId, price: Price, quantity: u32) -> bool {
        let Some(line_total) = price.checked_times(quantity) else {
            return false;
        };
        self.lines
            .iter()
            .filter(|l| &l.id != id)
            .try_fold(line_total, |acc, l| acc.checked_add(l.checked_line_total()?))
            .is_some()
    }

    /// Overwrite the persisted cart with the current state.
    ///
    /// Failures leave the in-memory cart intact; it just won't survive a reload.
    fn persist(&mut self) {
        if self.phase == Phase::Hydrating {
            trace!("Skipping cart write while hydrating");
            return;
        }

        let blob = match serde_json::to_string(&self.lines) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.write(&self.key, &blob) {
            warn!(error = %e, key = %self.key, "Failed to persist cart");
        }
    }
}

/// Sum of line totals, or `None` on overflow.
fn checked_subtotal(lines: &[CartLine]) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.checked_line_total()?))
}

/// Parse a persisted blob, rejecting anything that breaks the cart invariants.
fn parse_lines(blob: &str) -> Option<Vec<CartLine>> {
    let lines: Vec<CartLine> = serde_json::from_str(blob).ok()?;

    let mut seen = HashSet::with_capacity(lines.len());
    let valid = lines
        .iter()
        .all(|l| l.quantity >= 1 && seen.insert(l.id.clone()))
        && checked_subtotal(&lines).is_some();

    valid.then_some(lines)
}
