//! Order entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ecycle_core::{Email, OrderId, OrderStatus, Price};

use super::CartItem;

/// A completed checkout: the cart snapshot plus shipping and payment
/// fields. Immutable once created except for [`Order::status`], which
/// tracking and the admin panel mutate later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Derived from the epoch-millisecond timestamp at checkout, bumped
    /// past any existing id on collision.
    pub id: OrderId,
    #[serde(rename = "userEmail")]
    pub user_email: Email,
    /// Full copy of the cart at checkout time.
    pub items: Vec<CartItem>,
    /// Subtotal plus tax per the configured policy.
    pub total: Price,
    /// Checkout timestamp (serialized ISO-8601).
    pub date: DateTime<Utc>,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub payment: String,
    /// Orders persisted before the field existed read as pending - the
    /// one place the default-status policy lives.
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Display form used across order lists, e.g. "Order #E042".
    #[must_use]
    pub fn display_id(&self) -> String {
        format!("Order #E{:03}", self.id.as_i64())
    }
}
