//! Catalog browsing and admin product management.

use ecycle_core::{Price, ProductId};
use ecycle_shop::stores::{CatalogSort, NewProduct};

use super::{open_shop, require_admin};

/// List products with the shop page's filter and sort controls.
///
/// # Errors
///
/// Returns an error if storage fails or the sort name is unknown.
pub fn list(
    query: Option<&str>,
    category: Option<&str>,
    sort: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    let catalog = shop.catalog();

    let mut products = match sort {
        Some("price-asc") => catalog.sorted(CatalogSort::PriceAsc)?,
        Some("price-desc") => catalog.sorted(CatalogSort::PriceDesc)?,
        Some("popularity") => catalog.sorted(CatalogSort::Popularity)?,
        Some(other) => return Err(format!("unknown sort order: {other}").into()),
        None => catalog.list()?,
    };
    if let Some(query) = query {
        let query = query.trim();
        if !query.is_empty() {
            products.retain(|p| p.matches(query));
        }
    }
    if let Some(category) = category {
        products.retain(|p| p.category == category);
    }

    tracing::info!(count = products.len(), "catalog");
    for product in products {
        tracing::info!(
            id = %product.id,
            price = %product.price,
            category = %product.category,
            "{}",
            product.name
        );
    }
    Ok(())
}

/// Add a product (admin).
///
/// # Errors
///
/// Returns an error without an admin session or if storage fails.
pub fn add(
    name: &str,
    price: i64,
    category: &str,
    image: &str,
    description: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    require_admin(&shop)?;

    let created = shop.catalog().add(NewProduct {
        name: name.to_owned(),
        price: Price::from_dollars(price),
        category: category.to_owned(),
        image: image.to_owned(),
        description: description.to_owned(),
        popularity: 0,
    })?;
    tracing::info!(id = %created.id, "product added: {}", created.name);
    Ok(())
}

/// Delete a product (admin).
///
/// # Errors
///
/// Returns an error without an admin session, for an unknown id, or if
/// storage fails.
pub fn remove(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    require_admin(&shop)?;

    shop.catalog().remove(ProductId::new(id))?;
    tracing::info!(id, "product removed");
    Ok(())
}
