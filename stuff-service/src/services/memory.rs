use crate::models::{Item, ItemId};
use crate::services::ItemStore;
use async_trait::async_trait;
use service_core::error::AppError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local item store for tests and database-less runs.
///
/// Clones share the same map. While marked unavailable, every operation fails
/// the way an unreachable database would.
#[derive(Clone, Default)]
pub struct InMemoryItemStore {
    items: Arc<RwLock<HashMap<ItemId, Item>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    fn ensure_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "in-memory store is unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn insert(&self, item: &Item) -> Result<(), AppError> {
        self.ensure_available()?;

        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key: {}",
                item.id
            )));
        }
        items.insert(item.id, item.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Item>, AppError> {
        self.ensure_available()?;
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, AppError> {
        self.ensure_available()?;
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<u64, AppError> {
        self.ensure_available()?;
        Ok(self.items.write().await.remove(&id).map_or(0, |_| 1))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.ensure_available()
    }
}
