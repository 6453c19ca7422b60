//! Store API trait

use async_trait::async_trait;

use crate::client::models::{Store, StoreRequest};
use crate::error::Result;

#[async_trait]
pub trait StoreApi: Send + Sync {
    async fn list_stores(&self) -> Result<Vec<Store>>;

    async fn get_store(&self, store_id: i64) -> Result<Store>;

    async fn create_store(&self, request: &StoreRequest) -> Result<Store>;

    async fn edit_store(&self, store_id: i64, request: &StoreRequest) -> Result<Store>;

    /// Fails with a conflict while the store still holds materials or orders.
    async fn delete_store(&self, store_id: i64) -> Result<()>;
}
