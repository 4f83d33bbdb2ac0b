//! Compatibility with data written by earlier revisions, plus the
//! concurrent-writer conflict the version counter exists to catch.

use std::sync::Arc;

use ecycle_core::OrderStatus;
use ecycle_shop::models::{CartItem, Order, Product};
use ecycle_shop::{FileBackend, MemoryBackend, Shop, ShopConfig, StorageError, StorageHub};

/// A legacy store: pre-rename keys, bare values with no envelope, and an
/// order that predates the status field.
fn legacy_backend() -> Arc<MemoryBackend> {
    Arc::new(MemoryBackend::with_items([
        (
            "products",
            r#"[{"id":1,"name":"Old Bike","price":"500","category":"Road","image":"","description":""}]"#,
        ),
        (
            "cart",
            r#"[{"id":1,"name":"Old Bike","price":"500","image":"","quantity":2}]"#,
        ),
        (
            "orders",
            r#"[{"id":1,"userEmail":"old@example.com","items":[],"total":"500",
                 "date":"2023-06-01T00:00:00Z","name":"Old","address":"1 Road",
                 "phone":"555","payment":"card","status":"completed"}]"#,
        ),
        ("isLoggedIn", "true"),
    ]))
}

#[test]
fn test_legacy_keys_and_values_load() {
    let shop = Shop::new(legacy_backend(), ShopConfig::default());

    let products: Vec<Product> = shop.catalog().list().expect("catalog");
    assert_eq!(products.len(), 1);
    assert_eq!(products.first().map(|p| p.popularity), Some(0));

    let cart: Vec<CartItem> = shop.cart().items().expect("cart");
    assert_eq!(cart.first().map(|line| line.quantity), Some(2));

    let orders: Vec<Order> = shop.orders().list().expect("orders");
    assert_eq!(
        orders.first().map(|o| o.status),
        Some(OrderStatus::Delivered)
    );
}

#[test]
fn test_legacy_cart_key_migrates_on_first_write() {
    let backend = legacy_backend();
    let shop = Shop::new(backend.clone(), ShopConfig::default());

    let bike = shop.catalog().list().expect("catalog").remove(0);
    shop.cart().add(&bike).expect("add");

    use ecycle_shop::StorageBackend;
    assert!(backend.get_item("cart").expect("read").is_none());
    let migrated = backend
        .get_item("ecycle_cart")
        .expect("read")
        .expect("migrated key");
    assert!(migrated.contains("\"version\""));
}

#[test]
fn test_seed_respects_legacy_catalog() {
    let shop = Shop::new(legacy_backend(), ShopConfig::default());
    shop.init().expect("init");

    // The legacy catalog is data, not absence; seeding must not replace it
    let products = shop.catalog().list().expect("catalog");
    assert_eq!(products.len(), 1);
    assert_eq!(products.first().map(|p| p.name.as_str()), Some("Old Bike"));
}

#[test]
fn test_concurrent_writer_is_detected_not_overwritten() {
    let backend: Arc<MemoryBackend> = Arc::new(MemoryBackend::new());
    let hub_a = StorageHub::new(backend.clone());
    let hub_b = StorageHub::new(backend);

    hub_a.set("orders", &vec![1u32]).expect("set");

    let result = hub_a.update::<Vec<u32>, _, _>("orders", |orders| {
        // Second tab writes while this update is in flight
        hub_b.set("orders", &vec![1u32, 2]).expect("set");
        orders.push(3);
    });

    assert!(matches!(
        result,
        Err(StorageError::VersionConflict { .. })
    ));
    // The other writer's data survived
    let orders: Vec<u32> = hub_a.get("orders").expect("get");
    assert_eq!(orders, vec![1, 2]);
}

#[test]
fn test_file_backed_shop_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ecycle-data.json");

    {
        let shop = Shop::new(
            Arc::new(FileBackend::new(&path)),
            ShopConfig::default(),
        );
        shop.init().expect("init");
        let bike = shop.catalog().list().expect("catalog").remove(0);
        shop.cart().add(&bike).expect("add");
    }

    let reopened = Shop::new(
        Arc::new(FileBackend::new(&path)),
        ShopConfig::default(),
    );
    assert_eq!(reopened.catalog().list().expect("catalog").len(), 6);
    assert_eq!(reopened.cart().count().expect("count"), 1);
}
