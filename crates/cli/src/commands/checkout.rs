//! Checkout command.

use medmart_storefront::session::AuthSession;
use medmart_storefront::views::{CartView, CheckoutRedirect, checkout_redirect};
use medmart_storefront::{CartStorage, CartStore};
use tracing::info;

/// Resolve and print where the checkout button would send the shopper.
pub fn redirect<S: CartStorage>(
    store: &CartStore<S>,
    cookie_header: Option<&str>,
    cookie_name: &str,
) -> CheckoutRedirect {
    let session = cookie_header.and_then(|h| AuthSession::from_cookie_header(h, cookie_name));
    let target = checkout_redirect(&CartView::from(store), session.as_ref());
    info!(logged_in = session.is_some(), "Checkout redirects to {}", target.path());
    target
}
