//! Seed the default catalog and the admin account.

use super::open_shop;

/// Seed defaults where absent. Safe to run repeatedly.
///
/// # Errors
///
/// Returns an error if configuration or storage fails.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let shop = open_shop()?;
    shop.init()?;

    let products = shop.catalog().list()?;
    let users = shop.session().users()?;
    tracing::info!(
        products = products.len(),
        accounts = users.len(),
        "seed complete"
    );
    Ok(())
}
