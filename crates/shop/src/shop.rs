//! The assembled shop: one hub, every store, one config.

use std::sync::Arc;

use crate::checkout::CheckoutService;
use crate::config::ShopConfig;
use crate::storage::{StorageBackend, StorageHub};
use crate::stores::{CartStore, CatalogStore, MessageStore, OrderStore, SessionStore};

/// All stores wired to a shared [`StorageHub`].
#[derive(Debug, Clone)]
pub struct Shop {
    hub: Arc<StorageHub>,
    config: ShopConfig,
    catalog: CatalogStore,
    cart: CartStore,
    orders: OrderStore,
    session: SessionStore,
    messages: MessageStore,
    checkout: CheckoutService,
}

impl Shop {
    /// Assemble a shop over a storage backend.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>, config: ShopConfig) -> Self {
        let hub = Arc::new(StorageHub::new(backend));
        let catalog = CatalogStore::new(hub.clone());
        let cart = CartStore::new(hub.clone());
        let orders = OrderStore::new(hub.clone());
        let session = SessionStore::new(hub.clone(), config.admin_email.clone());
        let messages = MessageStore::new(hub.clone());
        let checkout =
            CheckoutService::new(cart.clone(), orders.clone(), session.clone(), config.tax);
        Self {
            hub,
            config,
            catalog,
            cart,
            orders,
            session,
            messages,
            checkout,
        }
    }

    /// A shop over an in-memory backend with default configuration.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(crate::storage::MemoryBackend::new()),
            ShopConfig::default(),
        )
    }

    /// Seed the default catalog and the admin account where absent.
    /// Idempotent; meant to run once at startup.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn init(&self) -> Result<(), crate::stores::StoreError> {
        self.catalog.seed_defaults()?;
        self.session.ensure_admin_account()?;
        Ok(())
    }

    /// The shared storage hub, for subscriptions and raw access.
    #[must_use]
    pub fn hub(&self) -> &Arc<StorageHub> {
        &self.hub
    }

    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn messages(&self) -> &MessageStore {
        &self.messages
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.checkout
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_init_seeds_catalog_and_admin() {
        let shop = Shop::in_memory();
        shop.init().unwrap();
        shop.init().unwrap();

        assert_eq!(shop.catalog().list().unwrap().len(), 6);
        assert_eq!(shop.session().users().unwrap().len(), 1);
    }

    #[test]
    fn test_stores_share_one_hub() {
        let shop = Shop::in_memory();
        shop.init().unwrap();

        let bike = shop.catalog().list().unwrap().remove(0);
        shop.cart().add(&bike).unwrap();
        assert_eq!(shop.cart().count().unwrap(), 1);
    }
}
