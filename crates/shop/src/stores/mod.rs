//! Data-access stores, one per storage key.
//!
//! Every store holds an `Arc<StorageHub>` and expresses each
//! mutation as one atomic `update` on its key - the whole-collection
//! read-modify-write that is this storage model's only primitive.

pub mod cart;
pub mod catalog;
pub mod messages;
pub mod orders;
pub mod session;

pub use cart::CartStore;
pub use catalog::{CatalogSort, CatalogStore, NewProduct};
pub use messages::MessageStore;
pub use orders::OrderStore;
pub use session::{AuthError, SessionStore, SignupForm};

use thiserror::Error;

use ecycle_core::{EmailError, OrderStatus};

use crate::error::StorageError;

/// Errors from the catalog, order, and message stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage hub or backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. "product" or "order".
        entity: &'static str,
        /// The missing id.
        id: i64,
    },

    /// Cancel requested on an order whose status forbids it.
    #[error("order cannot be cancelled from status '{0}'")]
    NotCancellable(OrderStatus),

    /// A required text field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A submitted email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
