//! Product catalog entity.

use serde::{Deserialize, Serialize};

use ecycle_core::{Price, ProductId};

/// An e-bike in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: String,
    /// Asset path or URL for the product image.
    pub image: String,
    pub description: String,
    /// Relative popularity used for the default shop sort. Records from
    /// before the field existed read as 0.
    #[serde(default)]
    pub popularity: u32,
}

impl Product {
    /// Case-insensitive match against name and description, the shop
    /// page's search box behavior.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}
