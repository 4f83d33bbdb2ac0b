//! Checkout: turn the current cart into an order.

use chrono::Utc;
use thiserror::Error;

use crate::config::TaxPolicy;
use crate::models::{Order, cart};
use crate::stores::{CartStore, OrderStore, SessionStore, StoreError, session::AuthError};

/// Shipping and payment fields from the checkout form.
#[derive(Debug, Clone)]
pub struct ShippingDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub payment: String,
}

/// Errors from placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout requires a session; a redirect back to checkout is
    /// recorded before this is returned.
    #[error("not logged in")]
    NotLoggedIn,

    /// Checkout with an empty cart does nothing.
    #[error("cart is empty")]
    EmptyCart,

    /// A required shipping field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Session lookup failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Cart or order store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Places orders from the cart, session, and order stores.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    cart: CartStore,
    orders: OrderStore,
    session: SessionStore,
    tax: TaxPolicy,
}

impl CheckoutService {
    /// Assemble the service from the stores it spans.
    #[must_use]
    pub fn new(cart: CartStore, orders: OrderStore, session: SessionStore, tax: TaxPolicy) -> Self {
        Self {
            cart,
            orders,
            session,
            tax,
        }
    }

    /// Place an order from the current cart, then empty the cart.
    ///
    /// The stored order snapshots the cart lines exactly; its total is
    /// the cart subtotal plus tax per the configured policy.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotLoggedIn`] without a session (after
    /// recording a redirect back to checkout),
    /// [`CheckoutError::MissingField`] for blank shipping fields, and
    /// [`CheckoutError::EmptyCart`] when there is nothing to order. The
    /// cart is left untouched in every error case.
    pub fn place_order(&self, details: &ShippingDetails) -> Result<Order, CheckoutError> {
        let Some(user) = self.session.current_user()? else {
            self.session.remember_redirect("checkout")?;
            return Err(CheckoutError::NotLoggedIn);
        };

        let name = required(&details.name, "name")?;
        let address = required(&details.address, "address")?;
        let phone = required(&details.phone, "phone")?;
        let payment = required(&details.payment, "payment method")?;

        let items = self.cart.items()?;
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let total = self.tax.total(cart::subtotal(&items));

        let order = self.orders.append(Order {
            id: crate::stores::orders::order_id_candidate(),
            user_email: user.email,
            items,
            total,
            date: Utc::now(),
            name,
            address,
            phone,
            payment,
            status: ecycle_core::OrderStatus::default(),
        })?;
        self.cart.clear()?;
        Ok(order)
    }
}

fn required(value: &str, field: &'static str) -> Result<String, CheckoutError> {
    let value = value.trim();
    if value.is_empty() {
        Err(CheckoutError::MissingField(field))
    } else {
        Ok(value.to_owned())
    }
}
