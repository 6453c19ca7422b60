//! User display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::User;
use crate::output::formatters::{format_enabled, or_none};

/// User display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "USERNAME")]
    pub username: String,

    /// Comma-separated role names
    #[tabled(rename = "ROLES")]
    pub roles: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "STORE")]
    pub store: String,
}

impl From<User> for UserDisplay {
    fn from(user: User) -> Self {
        let roles = user.role_names().join(", ");
        let store = match user.store {
            Some(ref store) => store
                .title
                .clone()
                .unwrap_or_else(|| format!("#{}", store.id)),
            None => or_none(None),
        };

        Self {
            id: user.id,
            status: format_enabled(user.enable),
            username: user.username,
            roles: if roles.is_empty() { or_none(None) } else { roles },
            store,
        }
    }
}
