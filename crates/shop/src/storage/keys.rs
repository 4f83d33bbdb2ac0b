//! Canonical storage keys.
//!
//! These are the keys the shop has always used, including the mixed naming
//! left by earlier revisions (some prefixed, some not). A few keys were
//! renamed at some point without migrating old data; [`legacy_alias`]
//! records the old spellings so the hub can migrate them on first read.

/// Product catalog (renamed from `products`).
pub const PRODUCTS: &str = "ecycle_products";

/// Shopping cart lines (renamed from `cart`).
pub const CART: &str = "ecycle_cart";

/// Append-only order list.
pub const ORDERS: &str = "orders";

/// Contact-form submissions.
pub const MESSAGES: &str = "contactMessages";

/// Registered user accounts.
pub const USERS: &str = "ecycle_users";

/// The account that last completed login or signup.
pub const CURRENT_USER: &str = "ecycle_current_user";

/// Logged-in flag (kept alongside `CURRENT_USER`; the session store
/// reconciles the two).
pub const LOGGED_IN: &str = "isLoggedIn";

/// Page to return to after a login forced by a gated action.
pub const REDIRECT_AFTER_LOGIN: &str = "redirectAfterLogin";

/// Order selected for the tracking view.
pub const SELECTED_ORDER: &str = "selectedOrder";

/// The pre-rename spelling of a key, if it ever had one.
#[must_use]
pub fn legacy_alias(key: &str) -> Option<&'static str> {
    match key {
        PRODUCTS => Some("products"),
        CART => Some("cart"),
        _ => None,
    }
}
