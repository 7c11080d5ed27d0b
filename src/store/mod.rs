//! Storage layer for items

mod dynamo;
mod memory;

pub use dynamo::{item_from_attributes, item_to_attributes, DynamoStore};
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Item;

/// Key-value collection of items keyed by `id`
///
/// Implementations issue one independent call per operation and hold no
/// per-request state, so a single instance is shared by every invocation.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Remove the item with this id. Removing a missing id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Fetch one item; `None` when the id is unknown.
    async fn get(&self, id: &str) -> Result<Option<Item>>;

    /// Every item in the store, in no particular order.
    async fn scan(&self) -> Result<Vec<Item>>;

    /// Insert the item or fully replace the one with the same id.
    async fn put(&self, item: Item) -> Result<()>;
}
