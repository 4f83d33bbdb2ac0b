//! The storage hub: one explicit store object with `get`/`set`/`update`/
//! `subscribe`, injected into every store.
//!
//! Values are persisted inside a [`Versioned`] envelope carrying a schema
//! tag and a write counter. Mutations go through [`StorageHub::update`],
//! an atomic read-modify-write under the hub's write lock; if the counter
//! moved underneath an update (another process sharing the backend), the
//! commit fails with a version conflict instead of silently dropping the
//! other writer's data.
//!
//! Values written before the envelope existed deserialize as schema 0,
//! version 0, and are re-wrapped on the next write. Keys that were renamed
//! across revisions are read via their legacy alias and migrated the same
//! way.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{StorageBackend, keys};
use crate::error::{Result, StorageError};

/// Schema tag written with every value.
pub const CURRENT_SCHEMA: u32 = 1;

/// The persisted envelope around every stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// Shape tag for the wrapped data.
    pub schema: u32,
    /// Write counter, incremented on every committed write.
    pub version: u64,
    /// The value itself.
    pub data: T,
}

/// Minimal parse used to learn a key's current version without knowing
/// its data shape. Bare legacy values fail the parse and count as 0.
#[derive(Deserialize)]
struct VersionProbe {
    #[serde(default)]
    version: u64,
}

type Subscriber = Box<dyn Fn(&str) + Send + Sync>;

/// Typed facade over a [`StorageBackend`].
///
/// Cheap to share: stores hold an `Arc<StorageHub>`. Two hubs over the
/// same backend model two browser tabs on the same storage.
pub struct StorageHub {
    backend: Arc<dyn StorageBackend>,
    write_lock: Mutex<()>,
    subscribers: RwLock<Vec<Subscriber>>,
}

impl std::fmt::Debug for StorageHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageHub").finish_non_exhaustive()
    }
}

impl StorageHub {
    /// Create a hub over a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Convenience constructor over a fresh [`super::MemoryBackend`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(super::MemoryBackend::new()))
    }

    /// Read a value, falling back to `T::default()` when the key is
    /// missing or its contents are unreadable.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend I/O failures; malformed JSON is
    /// logged and replaced by the default, matching how the shop has
    /// always recovered from corrupt keys.
    pub fn get<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        Ok(self.get_opt(key)?.unwrap_or_default())
    }

    /// Read a value, `None` when the key is missing or unreadable.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend I/O failures.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        Ok(self.load(key)?.map(|envelope| envelope.data))
    }

    /// Overwrite a value wholesale, bumping its version counter.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        {
            let _guard = self
                .write_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let version = self.current_version(key)?;
            self.commit(key, version + 1, value)?;
        }
        self.notify(key);
        Ok(())
    }

    /// Atomic read-modify-write: load the current value (or default),
    /// apply `f`, commit with the version bumped.
    ///
    /// Returns the committed value along with whatever `f` returned.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::VersionConflict`] if the key's version
    /// moved between the read and the commit (a concurrent writer on a
    /// shared backend), or an I/O/serialization error from the backend.
    pub fn update<T, R, F>(&self, key: &str, f: F) -> Result<(T, R)>
    where
        T: DeserializeOwned + Serialize + Default,
        F: FnOnce(&mut T) -> R,
    {
        let result = {
            let _guard = self
                .write_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            let (expected, mut data) = match self.load::<T>(key)? {
                Some(envelope) => (envelope.version, envelope.data),
                None => (0, T::default()),
            };

            let returned = f(&mut data);

            let found = self.current_version(key)?;
            if found != expected {
                return Err(StorageError::VersionConflict {
                    key: key.to_owned(),
                    expected,
                    found,
                });
            }

            self.commit(key, expected + 1, &data)?;
            (data, returned)
        };
        self.notify(key);
        Ok(result)
    }

    /// Remove a key (and its legacy alias, if any).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn remove(&self, key: &str) -> Result<()> {
        {
            let _guard = self
                .write_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            self.backend.remove_item(key)?;
            if let Some(alias) = keys::legacy_alias(key) {
                self.backend.remove_item(alias)?;
            }
        }
        self.notify(key);
        Ok(())
    }

    /// Register a callback fired with the key after every committed
    /// write or removal.
    pub fn subscribe<F>(&self, f: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.push(Box::new(f));
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    /// Load the envelope for a key, trying the canonical key first and
    /// then its legacy alias. Bare (pre-envelope) values come back as
    /// schema 0, version 0.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Versioned<T>>> {
        if let Some(raw) = self.backend.get_item(key)? {
            return Ok(parse_envelope(key, &raw));
        }
        if let Some(alias) = keys::legacy_alias(key)
            && let Some(raw) = self.backend.get_item(alias)?
        {
            tracing::debug!(key, alias, "reading value from legacy key");
            return Ok(parse_envelope(alias, &raw));
        }
        Ok(None)
    }

    /// Current version counter for a key (0 when missing or bare).
    fn current_version(&self, key: &str) -> Result<u64> {
        let Some(raw) = self.backend.get_item(key)? else {
            return Ok(0);
        };
        Ok(serde_json::from_str::<VersionProbe>(&raw)
            .map(|probe| probe.version)
            .unwrap_or(0))
    }

    /// Write the envelope and retire the key's legacy alias.
    fn commit<T: Serialize + ?Sized>(&self, key: &str, version: u64, data: &T) -> Result<()> {
        let envelope = Versioned {
            schema: CURRENT_SCHEMA,
            version,
            data,
        };
        let raw =
            serde_json::to_string(&envelope).map_err(|source| StorageError::Serialize {
                key: key.to_owned(),
                source,
            })?;
        self.backend.set_item(key, &raw)?;
        if let Some(alias) = keys::legacy_alias(key)
            && self.backend.get_item(alias)?.is_some()
        {
            tracing::debug!(key, alias, "migrated legacy key");
            self.backend.remove_item(alias)?;
        }
        Ok(())
    }

    fn notify(&self, key: &str) {
        let subscribers = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        for subscriber in subscribers.iter() {
            subscriber(key);
        }
    }
}

/// Parse a raw stored string as an envelope, falling back to a bare value
/// (schema 0), and finally to `None` with a warning for unreadable JSON.
fn parse_envelope<T: DeserializeOwned>(key: &str, raw: &str) -> Option<Versioned<T>> {
    if let Ok(envelope) = serde_json::from_str::<Versioned<T>>(raw) {
        return Some(envelope);
    }
    match serde_json::from_str::<T>(raw) {
        Ok(data) => Some(Versioned {
            schema: 0,
            version: 0,
            data,
        }),
        Err(e) => {
            tracing::warn!(key, error = %e, "unreadable value in storage, using default");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::storage::MemoryBackend;

    #[test]
    fn test_get_missing_returns_default() {
        let hub = StorageHub::in_memory();
        let items: Vec<String> = hub.get("ecycle_cart").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let hub = StorageHub::in_memory();
        hub.set("ecycle_cart", &vec!["a".to_owned()]).unwrap();
        let items: Vec<String> = hub.get("ecycle_cart").unwrap();
        assert_eq!(items, vec!["a".to_owned()]);
    }

    #[test]
    fn test_update_bumps_version() {
        let backend = Arc::new(MemoryBackend::new());
        let hub = StorageHub::new(backend.clone());

        hub.update::<Vec<u32>, _, _>("orders", |orders| orders.push(1))
            .unwrap();
        hub.update::<Vec<u32>, _, _>("orders", |orders| orders.push(2))
            .unwrap();

        let raw = backend.get_item("orders").unwrap().unwrap();
        let envelope: Versioned<Vec<u32>> = serde_json::from_str(&raw).unwrap();
        assert_eq!(envelope.schema, CURRENT_SCHEMA);
        assert_eq!(envelope.version, 2);
        assert_eq!(envelope.data, vec![1, 2]);
    }

    #[test]
    fn test_bare_legacy_value_reads_and_rewraps() {
        let backend = Arc::new(MemoryBackend::with_items([("isLoggedIn", "true")]));
        let hub = StorageHub::new(backend.clone());

        let logged_in: Option<bool> = hub.get_opt("isLoggedIn").unwrap();
        assert_eq!(logged_in, Some(true));

        hub.set("isLoggedIn", &false).unwrap();
        let raw = backend.get_item("isLoggedIn").unwrap().unwrap();
        assert!(raw.contains("\"version\":1"));
    }

    #[test]
    fn test_legacy_key_alias_migrates_on_write() {
        let backend = Arc::new(MemoryBackend::with_items([("cart", "[\"old\"]")]));
        let hub = StorageHub::new(backend.clone());

        // Readable under the canonical key via the alias
        let items: Vec<String> = hub.get("ecycle_cart").unwrap();
        assert_eq!(items, vec!["old".to_owned()]);

        // A write lands on the canonical key and retires the alias
        hub.update::<Vec<String>, _, _>("ecycle_cart", |items| items.push("new".to_owned()))
            .unwrap();
        assert!(backend.get_item("cart").unwrap().is_none());
        let migrated: Vec<String> = hub.get("ecycle_cart").unwrap();
        assert_eq!(migrated, vec!["old".to_owned(), "new".to_owned()]);
    }

    #[test]
    fn test_corrupt_value_replaced_by_default() {
        let backend = Arc::new(MemoryBackend::with_items([("orders", "{definitely not json")]));
        let hub = StorageHub::new(backend);
        let orders: Vec<u32> = hub.get("orders").unwrap();
        assert!(orders.is_empty());
    }

    #[test]
    fn test_update_detects_concurrent_writer() {
        // Two hubs over one backend model two tabs on the same storage.
        let backend = Arc::new(MemoryBackend::new());
        let hub_a = StorageHub::new(backend.clone());
        let hub_b = Arc::new(StorageHub::new(backend));

        hub_a.set("orders", &vec![1u32]).unwrap();

        let other = Arc::clone(&hub_b);
        let result = hub_a.update::<Vec<u32>, _, _>("orders", move |orders| {
            // The other tab writes while our update is in flight.
            other.set("orders", &vec![99u32]).unwrap();
            orders.push(2);
        });

        assert!(matches!(
            result,
            Err(StorageError::VersionConflict { expected: 1, found: 2, .. })
        ));
        // The other tab's write survived; ours was rejected.
        let surviving: Vec<u32> = hub_b.get("orders").unwrap();
        assert_eq!(surviving, vec![99]);
    }

    #[test]
    fn test_subscribers_fire_on_writes_and_removal() {
        let hub = StorageHub::in_memory();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        hub.subscribe(move |key| {
            assert_eq!(key, "contactMessages");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        hub.set("contactMessages", &Vec::<String>::new()).unwrap();
        hub.update::<Vec<String>, _, _>("contactMessages", |m| m.push("hi".to_owned()))
            .unwrap();
        hub.remove("contactMessages").unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
