//! Order history store.
//!
//! Orders are appended at checkout and mutated afterwards only through
//! status changes (tracking, cancel, the admin toggle) and admin delete.

use std::sync::Arc;

use chrono::Utc;

use ecycle_core::{Email, OrderId, OrderStatus};

use super::{Result, StoreError};
use crate::models::Order;
use crate::storage::{StorageHub, keys};

/// Store for the order history key.
#[derive(Debug, Clone)]
pub struct OrderStore {
    hub: Arc<StorageHub>,
}

impl OrderStore {
    /// Create an order store over a hub.
    #[must_use]
    pub fn new(hub: Arc<StorageHub>) -> Self {
        Self { hub }
    }

    /// All orders, across every customer.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn list(&self) -> Result<Vec<Order>> {
        Ok(self.hub.get(keys::ORDERS)?)
    }

    /// One customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn list_for_user(&self, email: &Email) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .list()?
            .into_iter()
            .filter(|order| order.user_email == *email)
            .collect();
        orders.sort_by_key(|order| std::cmp::Reverse(order.date));
        Ok(orders)
    }

    /// Look up an order by id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn get(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.list()?.into_iter().find(|order| order.id == id))
    }

    /// Append a new order. The candidate id (the checkout timestamp) is
    /// bumped past any colliding id already in the history, so two
    /// checkouts in the same millisecond both land.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn append(&self, mut order: Order) -> Result<Order> {
        let (_, stored) = self
            .hub
            .update::<Vec<Order>, _, _>(keys::ORDERS, |orders| {
                while orders.iter().any(|existing| existing.id == order.id) {
                    order.id = order.id.next();
                }
                orders.push(order.clone());
                order.clone()
            })?;
        tracing::info!(order = %stored.display_id(), total = %stored.total, "order placed");
        Ok(stored)
    }

    /// Set an order's status directly (admin and tracking flows).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no order has the id.
    pub fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<Order> {
        let (_, updated) = self
            .hub
            .update::<Vec<Order>, _, _>(keys::ORDERS, |orders| {
                orders.iter_mut().find(|order| order.id == id).map(|order| {
                    order.status = status;
                    order.clone()
                })
            })?;
        updated.ok_or(StoreError::NotFound {
            entity: "order",
            id: id.as_i64(),
        })
    }

    /// Cancel an order, refused once it is delivered or already cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no order has the id, or
    /// [`StoreError::NotCancellable`] if its status forbids cancelling.
    pub fn cancel(&self, id: OrderId) -> Result<Order> {
        let current = self.get(id)?.ok_or(StoreError::NotFound {
            entity: "order",
            id: id.as_i64(),
        })?;
        if !current.status.is_cancellable() {
            return Err(StoreError::NotCancellable(current.status));
        }
        let cancelled = self.set_status(id, OrderStatus::Cancelled)?;
        tracing::info!(order = %cancelled.display_id(), "order cancelled");
        Ok(cancelled)
    }

    /// Admin toggle between pending and delivered. Any other status flips
    /// to delivered.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no order has the id.
    pub fn toggle_completed(&self, id: OrderId) -> Result<Order> {
        let current = self.get(id)?.ok_or(StoreError::NotFound {
            entity: "order",
            id: id.as_i64(),
        })?;
        let next = if current.status == OrderStatus::Delivered {
            OrderStatus::Pending
        } else {
            OrderStatus::Delivered
        };
        self.set_status(id, next)
    }

    /// Delete an order from the history (admin panel).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no order has the id.
    pub fn delete(&self, id: OrderId) -> Result<()> {
        let (_, found) = self
            .hub
            .update::<Vec<Order>, _, _>(keys::ORDERS, |orders| {
                let before = orders.len();
                orders.retain(|order| order.id != id);
                orders.len() != before
            })?;
        if found {
            tracing::info!(order = %id, "order deleted");
            Ok(())
        } else {
            Err(StoreError::NotFound {
                entity: "order",
                id: id.as_i64(),
            })
        }
    }
}

/// Candidate id for a new order: the current epoch-millisecond
/// timestamp. [`OrderStore::append`] bumps it past collisions.
#[must_use]
pub(crate) fn order_id_candidate() -> OrderId {
    OrderId::new(Utc::now().timestamp_millis())
}
