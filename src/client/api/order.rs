//! Order API trait

use async_trait::async_trait;

use crate::client::models::{Order, OrderRequest};
use crate::client::pagination::{Page, PageParams};
use crate::error::Result;

#[async_trait]
pub trait OrderApi: Send + Sync {
    /// One page of orders, filtered by store, user, material text and size name.
    async fn list_orders(&self, params: &PageParams) -> Result<Page<Order>>;

    async fn create_order(&self, request: &OrderRequest) -> Result<Order>;

    async fn edit_order(&self, order_id: i64, request: &OrderRequest) -> Result<Order>;

    async fn delete_order(&self, order_id: i64) -> Result<()>;
}
