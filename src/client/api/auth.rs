//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{ChangePasswordRequest, Credentials, SetupRequest, SetupStatus};
use crate::error::Result;

/// Sign-in and first-run operations
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a session token. The token is stored by the gateway.
    async fn login(&self, credentials: &Credentials) -> Result<()>;

    /// Drop the local session. No network call is made.
    async fn logout(&self) -> Result<()>;

    /// Ask whether the service still needs first-run setup.
    async fn setup_status(&self) -> Result<SetupStatus>;

    /// Create the initial super admin and store.
    async fn setup(&self, request: &SetupRequest) -> Result<()>;

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()>;
}
