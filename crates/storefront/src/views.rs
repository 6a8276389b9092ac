//! Display models for cart pages.
//!
//! Views are rebuilt from the store on every render; they hold formatted
//! strings only and never feed back into cart state.

use rust_decimal::Decimal;

use crate::cart::{CartLine, CartStore};
use crate::session::AuthSession;
use crate::storage::CartStorage;

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_amount(Decimal::ZERO),
            item_count: 0,
        }
    }

    /// Whether there is anything to check out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Format a decimal amount as a price string.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("${amount:.2}")
}

impl<S: CartStorage> From<&CartStore<S>> for CartView {
    fn from(store: &CartStore<S>) -> Self {
        Self {
            items: store.lines().iter().map(CartItemView::from).collect(),
            subtotal: format_amount(store.subtotal()),
            item_count: store.total_quantity(),
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.price.to_string(),
            line_price: format_amount(line.line_total()),
            image: line.image.clone(),
        }
    }
}

/// Where the checkout button sends the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutRedirect {
    /// Nothing in the cart.
    Cart,
    /// Not logged in.
    Login,
    /// Proceed to the checkout form.
    Checkout,
}

impl CheckoutRedirect {
    /// Target path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Cart => "/cart",
            Self::Login => "/auth/login?next=/checkout",
            Self::Checkout => "/checkout",
        }
    }
}

/// Decide where checkout navigation goes.
#[must_use]
pub fn checkout_redirect(cart: &CartView, session: Option<&AuthSession>) -> CheckoutRedirect {
    if cart.is_empty() {
        CheckoutRedirect::Cart
    } else if session.is_none() {
        CheckoutRedirect::Login
    } else {
        CheckoutRedirect::Checkout
    }
}
