//! String-keyed JSON blob storage.
//!
//! The persistence model is browser local storage: every value is a JSON
//! string under a string key, read and written whole. [`StorageBackend`]
//! is that contract; [`StorageHub`] layers typed access, a version
//! counter, legacy-key migration, and change subscriptions on top.

pub mod file;
pub mod hub;
pub mod keys;
pub mod memory;

pub use file::FileBackend;
pub use hub::{StorageHub, Versioned};
pub use memory::MemoryBackend;

use crate::error::Result;

/// A synchronous string-keyed blob store.
///
/// Implementations are the moral equivalent of `window.localStorage`:
/// no partial updates, no transactions, last write wins at this level.
/// Atomicity and conflict detection live in [`StorageHub`].
pub trait StorageBackend: Send + Sync {
    /// Read the raw string stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::Io`] if the backing medium fails.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::Io`] if the backing medium fails.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`. Removing a missing key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::Io`] if the backing medium fails.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// All keys currently present.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::Io`] if the backing medium fails.
    fn keys(&self) -> Result<Vec<String>>;
}
