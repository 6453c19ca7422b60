//! User API trait

use async_trait::async_trait;

use crate::client::models::{CreateUserRequest, User};
use crate::error::Result;

/// Account management
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;

    /// The signed-in user, with roles and store.
    async fn current_user(&self) -> Result<User>;

    async fn create_user(&self, request: &CreateUserRequest) -> Result<User>;

    async fn delete_user(&self, user_id: i64) -> Result<()>;
}
