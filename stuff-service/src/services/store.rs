//! Persistence seam used by the HTTP handlers.
//!
//! Handlers only see `Arc<dyn ItemStore>`, so the MongoDB backend can be swapped
//! for the in-memory one in tests and local runs.

use crate::models::{Item, ItemId};
use async_trait::async_trait;
use service_core::error::AppError;

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Persists a new item. The item's id must not already exist.
    async fn insert(&self, item: &Item) -> Result<(), AppError>;

    /// Returns every stored item in no particular order.
    async fn find_all(&self) -> Result<Vec<Item>, AppError>;

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, AppError>;

    /// Deletes the item with `id`, returning how many records were removed (0 or 1).
    async fn delete_by_id(&self, id: ItemId) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;

    /// Releases backend resources. Called once after the server stops.
    async fn shutdown(&self) {}
}
