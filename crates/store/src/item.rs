//! Item record

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store.
pub type ItemId = i32;

/// A named record held by the [`ItemStore`](crate::ItemStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier, unique among live items
    pub id: ItemId,
    /// Client-supplied name, never blank
    pub name: String,
}

impl Item {
    /// Build an item from an id and a name.
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Whether `name` is empty or whitespace-only, and so cannot be stored.
pub fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}
