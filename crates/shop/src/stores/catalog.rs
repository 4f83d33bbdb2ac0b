//! Product catalog store.
//!
//! Seeded from the bundled default list when the key holds nothing; the
//! admin panel adds, edits, and deletes records. Search, category filter,
//! and sorting back the shop page's controls.

use std::sync::Arc;

use ecycle_core::{Price, ProductId};

use super::{Result, StoreError};
use crate::models::Product;
use crate::storage::{StorageHub, keys};

/// Input for a product created from the admin panel.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub category: String,
    pub image: String,
    pub description: String,
    pub popularity: u32,
}

/// Sort orders offered by the shop page controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSort {
    PriceAsc,
    PriceDesc,
    Popularity,
}

/// Store for the product catalog key.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    hub: Arc<StorageHub>,
}

impl CatalogStore {
    /// Create a catalog store over a hub.
    #[must_use]
    pub fn new(hub: Arc<StorageHub>) -> Self {
        Self { hub }
    }

    /// Seed the bundled default catalog if the key holds nothing, and
    /// return the resulting list.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn seed_defaults(&self) -> Result<Vec<Product>> {
        let existing = self.list()?;
        if !existing.is_empty() {
            return Ok(existing);
        }
        let defaults = default_products();
        self.hub.set(keys::PRODUCTS, &defaults)?;
        tracing::info!(count = defaults.len(), "seeded default catalog");
        Ok(defaults)
    }

    /// All products.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn list(&self) -> Result<Vec<Product>> {
        Ok(self.hub.get(keys::PRODUCTS)?)
    }

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn get(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// Add a product, assigning `max(existing ids) + 1`.
    ///
    /// Deleting the highest-id product and adding a new one reuses that
    /// id; order history referencing the old id will point at the new
    /// product.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn add(&self, new: NewProduct) -> Result<Product> {
        let (_, created) = self
            .hub
            .update::<Vec<Product>, _, _>(keys::PRODUCTS, |products| {
                let id = products
                    .iter()
                    .map(|p| p.id)
                    .max()
                    .map_or(ProductId::new(1), |max| max.next());
                let product = Product {
                    id,
                    name: new.name,
                    price: new.price,
                    category: new.category,
                    image: new.image,
                    description: new.description,
                    popularity: new.popularity,
                };
                products.push(product.clone());
                product
            })?;
        tracing::info!(id = %created.id, name = %created.name, "product added");
        Ok(created)
    }

    /// Replace an existing product record (matched by id).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no product has the id.
    pub fn edit(&self, product: Product) -> Result<Product> {
        let id = product.id;
        let (_, found) = self
            .hub
            .update::<Vec<Product>, _, _>(keys::PRODUCTS, |products| {
                match products.iter_mut().find(|p| p.id == id) {
                    Some(slot) => {
                        *slot = product.clone();
                        true
                    }
                    None => false,
                }
            })?;
        if found {
            Ok(product)
        } else {
            Err(StoreError::NotFound {
                entity: "product",
                id: id.as_i64(),
            })
        }
    }

    /// Delete a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no product has the id.
    pub fn remove(&self, id: ProductId) -> Result<()> {
        let (_, found) = self
            .hub
            .update::<Vec<Product>, _, _>(keys::PRODUCTS, |products| {
                let before = products.len();
                products.retain(|p| p.id != id);
                products.len() != before
            })?;
        if found {
            tracing::info!(id = %id, "product deleted");
            Ok(())
        } else {
            Err(StoreError::NotFound {
                entity: "product",
                id: id.as_i64(),
            })
        }
    }

    /// Products matching a search query (name or description substring,
    /// case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn search(&self, query: &str) -> Result<Vec<Product>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list();
        }
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.matches(query))
            .collect())
    }

    /// Products in a category (exact match).
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn by_category(&self, category: &str) -> Result<Vec<Product>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    /// All products under one of the shop page sort orders.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn sorted(&self, sort: CatalogSort) -> Result<Vec<Product>> {
        let mut products = self.list()?;
        match sort {
            CatalogSort::PriceAsc => products.sort_by_key(|p| p.price),
            CatalogSort::PriceDesc => {
                products.sort_by_key(|p| std::cmp::Reverse(p.price));
            }
            CatalogSort::Popularity => {
                products.sort_by_key(|p| std::cmp::Reverse(p.popularity));
            }
        }
        Ok(products)
    }
}

/// The bundled default catalog.
fn default_products() -> Vec<Product> {
    let bike = |id: i64, name: &str, dollars: i64, category: &str, image: &str, desc: &str, pop| {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::from_dollars(dollars),
            category: category.to_owned(),
            image: image.to_owned(),
            description: desc.to_owned(),
            popularity: pop,
        }
    };
    vec![
        bike(
            1,
            "Urban Commuter",
            1199,
            "Commuter",
            "img/bike1.jpg",
            "Lightweight e-bike optimized for city rides.",
            8,
        ),
        bike(
            2,
            "Trail Explorer",
            1599,
            "Mountain",
            "img/bike2.jpg",
            "Robust suspension and long-range battery.",
            7,
        ),
        bike(
            3,
            "Folding City",
            999,
            "Folding",
            "img/bike3.jpg",
            "Compact folding e-bike for easy storage.",
            6,
        ),
        bike(
            4,
            "Cargo Pro",
            2099,
            "Cargo",
            "img/bike4.jpg",
            "High-capacity cargo e-bike for heavy loads.",
            5,
        ),
        bike(
            5,
            "Sport Racer",
            1799,
            "Road",
            "img/bike5.jpg",
            "Fast and agile e-bike for sporty rides.",
            9,
        ),
        bike(
            6,
            "All-Terrain",
            1449,
            "Hybrid",
            "img/bike6.jpg",
            "Versatile e-bike for mixed terrains.",
            4,
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn store() -> CatalogStore {
        CatalogStore::new(Arc::new(StorageHub::in_memory()))
    }

    fn sample(name: &str, dollars: i64) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            price: Price::from_dollars(dollars),
            category: "Road".to_owned(),
            image: "img/x.jpg".to_owned(),
            description: "desc".to_owned(),
            popularity: 1,
        }
    }

    #[test]
    fn test_seed_defaults_once() {
        let store = store();
        let seeded = store.seed_defaults().unwrap();
        assert_eq!(seeded.len(), 6);

        // A second seed call leaves the catalog alone
        store.remove(ProductId::new(6)).unwrap();
        assert_eq!(store.seed_defaults().unwrap().len(), 5);
    }

    #[test]
    fn test_add_assigns_max_plus_one() {
        let store = store();
        store.seed_defaults().unwrap();
        let created = store.add(sample("New Bike", 500)).unwrap();
        assert_eq!(created.id, ProductId::new(7));
    }

    #[test]
    fn test_add_reuses_id_after_top_delete() {
        // max+1 assignment: deleting the highest id frees it for reuse
        let store = store();
        let a = store.add(sample("A", 100)).unwrap();
        assert_eq!(a.id, ProductId::new(1));
        let b = store.add(sample("B", 200)).unwrap();
        assert_eq!(b.id, ProductId::new(2));

        store.remove(b.id).unwrap();
        let c = store.add(sample("C", 300)).unwrap();
        assert_eq!(c.id, ProductId::new(2));
    }

    #[test]
    fn test_edit_and_not_found() {
        let store = store();
        let mut product = store.add(sample("A", 100)).unwrap();
        product.price = Price::from_dollars(150);
        store.edit(product.clone()).unwrap();
        assert_eq!(
            store.get(product.id).unwrap().unwrap().price,
            Price::from_dollars(150)
        );

        product.id = ProductId::new(99);
        assert!(matches!(
            store.edit(product),
            Err(StoreError::NotFound { entity: "product", id: 99 })
        ));
    }

    #[test]
    fn test_remove_not_found() {
        let store = store();
        assert!(matches!(
            store.remove(ProductId::new(1)),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_search_and_category() {
        let store = store();
        store.seed_defaults().unwrap();

        let hits = store.search("folding").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Folding City");

        let road = store.by_category("Road").unwrap();
        assert_eq!(road.len(), 1);
        assert_eq!(road[0].name, "Sport Racer");

        // Blank query returns everything
        assert_eq!(store.search("  ").unwrap().len(), 6);
    }

    #[test]
    fn test_sorted() {
        let store = store();
        store.seed_defaults().unwrap();

        let by_price = store.sorted(CatalogSort::PriceAsc).unwrap();
        assert_eq!(by_price[0].name, "Folding City");
        assert_eq!(by_price[5].name, "Cargo Pro");

        let by_popularity = store.sorted(CatalogSort::Popularity).unwrap();
        assert_eq!(by_popularity[0].name, "Sport Racer");
    }
}
