//! Integration tests for ECycle.
//!
//! The shop is a library over a pluggable storage backend, so these tests
//! run fully in-process: each scenario assembles a [`ecycle_shop::Shop`]
//! over an in-memory or temp-file backend and drives the public store
//! APIs end to end.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ecycle-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping_flow` - cart to checkout to order history
//! - `accounts` - signup, login, and session reconciliation
//! - `admin_panel` - order and message management
//! - `storage_compat` - legacy data migration and concurrent-writer
//!   conflicts

use ecycle_shop::stores::session::SignupForm;
use ecycle_shop::{Shop, ShopConfig};

/// A seeded in-memory shop: default catalog plus the admin account.
///
/// # Panics
///
/// Panics if seeding fails, which an in-memory backend never does.
#[must_use]
pub fn seeded_shop() -> Shop {
    let shop = Shop::in_memory();
    shop.init().unwrap_or_else(|e| panic!("seed failed: {e}"));
    shop
}

/// A default signup form for a test customer.
#[must_use]
pub fn customer_form(email: &str) -> SignupForm {
    SignupForm {
        name: "Test Customer".to_owned(),
        email: email.to_owned(),
        password: "secret1".to_owned(),
        confirm_password: "secret1".to_owned(),
    }
}

/// Sign up and leave the session logged in.
///
/// # Panics
///
/// Panics if the signup is rejected.
pub fn log_in_customer(shop: &Shop, email: &str) {
    shop.session()
        .signup(&customer_form(email))
        .unwrap_or_else(|e| panic!("signup failed: {e}"));
}

/// Log in as the built-in admin account.
///
/// # Panics
///
/// Panics if the admin account is missing (run [`seeded_shop`] first).
pub fn log_in_admin(shop: &Shop) {
    let email = ShopConfig::default().admin_email;
    shop.session()
        .login(email.as_str(), "admin123")
        .unwrap_or_else(|e| panic!("admin login failed: {e}"));
}
