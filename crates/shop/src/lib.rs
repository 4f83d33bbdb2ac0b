//! ECycle Shop - storage hub, stores, and the checkout flow.
//!
//! Everything the shop persists lives in a string-keyed JSON blob store
//! behind [`storage::StorageBackend`] (the local-storage model: whole
//! values read, mutated in memory, written back whole). On top of that:
//!
//! - [`storage::StorageHub`] - the one explicit store object with
//!   `get`/`set`/`update`/`subscribe`, injected into every store
//! - [`stores`] - catalog, cart, orders, session/users, contact messages
//! - [`checkout`] - order creation gated on login and cart contents
//! - [`tracking`] - simulated delivery estimates and progress steps
//!
//! # Concurrency
//!
//! All operations are synchronous and blocking. The hub serializes writes
//! and carries a version counter per key, so a second writer sharing the
//! same backing file is detected as a conflict rather than silently
//! overwritten.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod shop;
pub mod storage;
pub mod stores;
pub mod tracking;

pub use checkout::{CheckoutError, CheckoutService, ShippingDetails};
pub use config::{ConfigError, ShopConfig, TaxPolicy};
pub use error::StorageError;
pub use shop::Shop;
pub use storage::{FileBackend, MemoryBackend, StorageBackend, StorageHub};
