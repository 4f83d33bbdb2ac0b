//! Cart commands.

use ecycle_core::ProductId;

use super::open_shop;

/// Print the cart with its subtotal.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    let items = shop.cart().items()?;
    if items.is_empty() {
        tracing::info!("cart is empty");
        return Ok(());
    }
    for line in &items {
        tracing::info!(
            id = %line.id,
            quantity = line.quantity,
            each = %line.price,
            total = %line.line_total(),
            "{}",
            line.name
        );
    }
    tracing::info!(subtotal = %shop.cart().subtotal()?, items = shop.cart().count()?, "cart");
    Ok(())
}

/// Add one of a product by id.
///
/// # Errors
///
/// Returns an error for an unknown product id or if storage fails.
pub fn add(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    let product = shop
        .catalog()
        .get(ProductId::new(id))?
        .ok_or_else(|| format!("no product with id {id}"))?;
    shop.cart().add(&product)?;
    tracing::info!("added {} to cart", product.name);
    Ok(())
}

/// Increment a line's quantity.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn increase(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    shop.cart().increase(ProductId::new(id))?;
    Ok(())
}

/// Decrement a line's quantity.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn decrease(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    shop.cart().decrease(ProductId::new(id))?;
    Ok(())
}

/// Remove a line outright.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn remove(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    shop.cart().remove(ProductId::new(id))?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    shop.cart().clear()?;
    tracing::info!("cart cleared");
    Ok(())
}
