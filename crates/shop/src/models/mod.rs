//! Persisted entity types.
//!
//! These are the exact JSON shapes written to storage; serde defaults
//! cover the fields older revisions left out (status, popularity).

pub mod cart;
pub mod message;
pub mod order;
pub mod product;
pub mod user;

pub use cart::CartItem;
pub use message::ContactMessage;
pub use order::Order;
pub use product::Product;
pub use user::User;
