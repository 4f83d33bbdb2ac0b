//! Cart line entity.

use serde::{Deserialize, Serialize};

use ecycle_core::{Price, ProductId};

use super::Product;

/// One line of the shopping cart: a product snapshot plus a quantity.
///
/// The cart store never persists a line with quantity 0 - decrementing to
/// zero deletes the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// References [`Product::id`].
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    /// A new single-quantity line for a product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Price x quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Sum of line totals across a set of cart lines.
#[must_use]
pub fn subtotal(items: &[CartItem]) -> Price {
    items.iter().map(CartItem::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i64, dollars: i64, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("Bike {id}"),
            price: Price::from_dollars(dollars),
            image: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line(1, 1200, 2).line_total(), Price::from_dollars(2400));
    }

    #[test]
    fn test_subtotal() {
        let items = [line(1, 1200, 2), line(2, 999, 1)];
        assert_eq!(subtotal(&items), Price::from_dollars(3399));
        assert_eq!(subtotal(&[]), Price::ZERO);
    }
}
