//! Shopping cart store.
//!
//! Add increments the quantity of an existing line or pushes a new one;
//! decrease deletes the line when it reaches zero. The persisted cart
//! never contains a line with quantity 0.

use std::sync::Arc;

use ecycle_core::{Price, ProductId};

use super::Result;
use crate::models::{CartItem, Product, cart};
use crate::storage::{StorageHub, keys};

/// Store for the cart key.
#[derive(Debug, Clone)]
pub struct CartStore {
    hub: Arc<StorageHub>,
}

impl CartStore {
    /// Create a cart store over a hub.
    #[must_use]
    pub fn new(hub: Arc<StorageHub>) -> Self {
        Self { hub }
    }

    /// Current cart lines.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn items(&self) -> Result<Vec<CartItem>> {
        Ok(self.hub.get(keys::CART)?)
    }

    /// Add one of a product: bump the existing line or push a new one.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn add(&self, product: &Product) -> Result<Vec<CartItem>> {
        let (items, _) = self
            .hub
            .update::<Vec<CartItem>, _, _>(keys::CART, |items| {
                match items.iter_mut().find(|line| line.id == product.id) {
                    Some(line) => line.quantity += 1,
                    None => items.push(CartItem::from_product(product)),
                }
            })?;
        tracing::debug!(product = %product.id, "added to cart");
        Ok(items)
    }

    /// Increment a line's quantity. Unknown ids are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn increase(&self, id: ProductId) -> Result<Vec<CartItem>> {
        let (items, found) = self
            .hub
            .update::<Vec<CartItem>, _, _>(keys::CART, |items| {
                match items.iter_mut().find(|line| line.id == id) {
                    Some(line) => {
                        line.quantity += 1;
                        true
                    }
                    None => false,
                }
            })?;
        if !found {
            tracing::warn!(product = %id, "increase on item not in cart");
        }
        Ok(items)
    }

    /// Decrement a line's quantity, deleting the line at zero. Unknown
    /// ids are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn decrease(&self, id: ProductId) -> Result<Vec<CartItem>> {
        let (items, found) = self
            .hub
            .update::<Vec<CartItem>, _, _>(keys::CART, |items| {
                let Some(index) = items.iter().position(|line| line.id == id) else {
                    return false;
                };
                if let Some(line) = items.get_mut(index) {
                    line.quantity = line.quantity.saturating_sub(1);
                    if line.quantity == 0 {
                        items.remove(index);
                    }
                }
                true
            })?;
        if !found {
            tracing::warn!(product = %id, "decrease on item not in cart");
        }
        Ok(items)
    }

    /// Remove a line outright. Unknown ids are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn remove(&self, id: ProductId) -> Result<Vec<CartItem>> {
        let (items, found) = self
            .hub
            .update::<Vec<CartItem>, _, _>(keys::CART, |items| {
                let before = items.len();
                items.retain(|line| line.id != id);
                items.len() != before
            })?;
        if !found {
            tracing::warn!(product = %id, "remove on item not in cart");
        }
        Ok(items)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn clear(&self) -> Result<()> {
        self.hub.set(keys::CART, &Vec::<CartItem>::new())?;
        Ok(())
    }

    /// Sum of price x quantity across all lines.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn subtotal(&self) -> Result<Price> {
        Ok(cart::subtotal(&self.items()?))
    }

    /// Total item count (sum of quantities), the cart badge number.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn count(&self) -> Result<u32> {
        Ok(self.items()?.iter().map(|line| line.quantity).sum())
    }
}
