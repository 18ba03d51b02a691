//! Store errors module

use thiserror::Error;

use crate::ItemId;

/// Errors returned by store mutations.
///
/// A missing item is never an error: lookups return `None` and deletes
/// return `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Item name must not be empty or whitespace")]
    BlankName,

    #[error("Id space exhausted: highest id is {max_id}")]
    IdSpaceExhausted { max_id: ItemId },
}
