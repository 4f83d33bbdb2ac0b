//! Command implementations, one module per command group.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod contact;
pub mod orders;
pub mod seed;

use std::sync::Arc;

use thiserror::Error;

use ecycle_shop::{FileBackend, Shop, ShopConfig};

/// Errors shared by the command modules.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command needs a logged-in account.
    #[error("not logged in - run `ecycle account login` first")]
    NotLoggedIn,

    /// The command needs the admin account.
    #[error("admin access required - log in as the admin account")]
    NotAdmin,
}

/// Open the shop over the configured data file.
///
/// The path comes from `ECYCLE_DATA_FILE`, defaulting to
/// `ecycle-data.json` in the working directory.
pub fn open_shop() -> Result<Shop, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = ShopConfig::from_env()?;
    let path =
        std::env::var("ECYCLE_DATA_FILE").unwrap_or_else(|_| "ecycle-data.json".to_owned());
    Ok(Shop::new(Arc::new(FileBackend::new(path)), config))
}

/// Guard for commands that need the admin account.
pub fn require_admin(shop: &Shop) -> Result<(), Box<dyn std::error::Error>> {
    if shop.session().is_admin()? {
        Ok(())
    } else {
        Err(CliError::NotAdmin.into())
    }
}
