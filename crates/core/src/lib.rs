//! ECycle Core - Shared types library.
//!
//! This crate provides common types used across all ECycle Hub components:
//! - `shop` - Storage hub, stores, and the checkout flow
//! - `cli` - Command-line front end driving a file-backed shop
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails,
//!   passwords, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
