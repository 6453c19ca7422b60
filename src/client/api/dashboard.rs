//! Dashboard API trait

use async_trait::async_trait;

use crate::client::models::Dashboard;
use crate::error::Result;

#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn dashboard(&self) -> Result<Dashboard>;
}
