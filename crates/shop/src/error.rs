//! Storage-layer error type.
//!
//! Store-level errors ([`crate::stores::StoreError`],
//! [`crate::stores::AuthError`], [`crate::checkout::CheckoutError`]) wrap
//! this one.

use thiserror::Error;

/// Errors that can occur in the storage hub or a backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend I/O failed (file backend only; the memory backend is
    /// infallible).
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for storage.
    #[error("failed to serialize value for key '{key}': {source}")]
    Serialize {
        /// Storage key being written.
        key: String,
        /// Underlying serde error.
        source: serde_json::Error,
    },

    /// The version counter for a key changed between read and commit.
    ///
    /// Another writer (a second process sharing the backing file) got
    /// there first. The caller may re-read and retry.
    #[error("version conflict on key '{key}': expected {expected}, found {found}")]
    VersionConflict {
        /// Storage key being updated.
        key: String,
        /// Version observed at the start of the update.
        expected: u64,
        /// Version found at commit time.
        found: u64,
    },
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
