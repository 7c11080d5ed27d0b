//! In-process item store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::ItemStore;
use crate::error::Result;
use crate::types::Item;

/// Item store backed by a shared in-memory map
///
/// Used by the local server when no table is reachable and as the fake
/// store in tests. Contents are lost when the process exits.
#[derive(Default, Clone)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, Item>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn delete(&self, id: &str) -> Result<()> {
        let removed = self.items.write().await.remove(id);
        tracing::trace!(id, existed = removed.is_some(), "memory delete");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(id).cloned())
    }

    async fn scan(&self) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }

    async fn put(&self, item: Item) -> Result<()> {
        let mut items = self.items.write().await;
        items.insert(item.id.clone(), item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str) -> Item {
        Item::new(id, name, serde_json::Number::from(5))
    }

    #[tokio::test]
    async fn test_put_replaces_whole_item() {
        let store = MemoryStore::new();
        store.put(item("1", "first")).await.unwrap();
        store.put(item("1", "second")).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("1").await.unwrap().unwrap().name, "second");
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let store = MemoryStore::new();
        store.delete("nope").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_contents() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.put(item("a", "shared")).await.unwrap();

        assert_eq!(other.scan().await.unwrap().len(), 1);
    }
}
