//! Item Store Module
//!
//! This module implements the in-memory collection of items together with
//! the id-assignment rule. All access goes through [`ItemStore`]; the
//! underlying vector is never handed out.
//!
//! Ids are derived from the current contents (`max + 1`, or `1` when the
//! store is empty) rather than from a persisted counter. Deleting the
//! highest-numbered item and then creating a new one therefore reuses that
//! id. Each create scans the collection, which is fine at this scale but
//! would need a monotonic counter for large collections.

use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::StoreError;
use crate::item::{is_blank, Item, ItemId};
use crate::Result;

/// Names of the items created by [`ItemStore::seeded`].
pub const SEED_ITEM_NAMES: &[&str] = &["First item", "Second item", "Third item"];

/// Shared, lock-guarded collection of items
///
/// Reads take the read lock and return owned snapshots. `create` and
/// `delete` hold the write lock across their whole read-modify-write, so
/// concurrent operations behave as if applied in some total order.
#[derive(Debug, Default)]
pub struct ItemStore {
    /// Items in insertion order
    items: RwLock<Vec<Item>>,
}

impl ItemStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given items.
    ///
    /// Items with a blank name or a duplicate id are skipped so the store
    /// invariants hold from the start.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut accepted: Vec<Item> = Vec::new();
        for item in items {
            if is_blank(&item.name) || accepted.iter().any(|i| i.id == item.id) {
                debug!(id = item.id, "Skipping invalid initial item");
                continue;
            }
            accepted.push(item);
        }

        Self {
            items: RwLock::new(accepted),
        }
    }

    /// Create a store pre-populated with the demo items (ids 1 to 3)
    pub fn seeded() -> Self {
        Self::with_items(
            SEED_ITEM_NAMES
                .iter()
                .zip(1..)
                .map(|(name, id)| Item::new(id, *name)),
        )
    }

    /// Snapshot of all items in insertion order
    pub async fn list(&self) -> Vec<Item> {
        self.items.read().await.clone()
    }

    /// Look up an item by id
    pub async fn get(&self, id: ItemId) -> Option<Item> {
        self.items.read().await.iter().find(|i| i.id == id).cloned()
    }

    /// Create an item with the next id and append it.
    ///
    /// The name is stored as supplied; it only has to be non-blank after
    /// trimming.
    pub async fn create(&self, name: impl Into<String>) -> Result<Item> {
        let name = name.into();
        if is_blank(&name) {
            return Err(StoreError::BlankName);
        }

        let mut items = self.items.write().await;
        let id = next_id(&items)?;
        let item = Item::new(id, name);
        items.push(item.clone());

        debug!(id, name = %item.name, "Created item");
        Ok(item)
    }

    /// Remove the item with `id`, returning whether anything was removed
    pub async fn delete(&self, id: ItemId) -> bool {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        let removed = items.len() != before;

        if removed {
            debug!(id, "Deleted item");
        }
        removed
    }

    /// Number of items currently stored
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the store holds no items
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

/// One past the highest id present, or 1 for an empty collection.
fn next_id(items: &[Item]) -> Result<ItemId> {
    match items.iter().map(|i| i.id).max() {
        None => Ok(1),
        Some(max_id) => max_id
            .checked_add(1)
            .ok_or(StoreError::IdSpaceExhausted { max_id }),
    }
}
