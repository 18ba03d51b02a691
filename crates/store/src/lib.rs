//! In-memory item store
//!
//! This crate defines the [`Item`] record and the [`ItemStore`] that owns
//! every item, assigns ids and serializes mutations behind a single lock.

pub mod errors;
pub mod item;
pub mod store;

pub use errors::StoreError;
pub use item::{Item, ItemId};
pub use store::{ItemStore, SEED_ITEM_NAMES};

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
