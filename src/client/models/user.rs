//! User and role models

use serde::{Deserialize, Serialize};

pub const SUPER_ADMIN: &str = "SUPER_ADMIN";
pub const LOCAL_ADMIN: &str = "LOCAL_ADMIN";

/// Role as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
}

/// Reference to a store by id, optionally with its title
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRef {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Account record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,

    pub username: String,

    /// 1 enabled, 0 disabled
    #[serde(default)]
    pub enable: i32,

    #[serde(default)]
    pub roles: Vec<Role>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreRef>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.name == role)
    }

    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }
}

/// Create-user payload
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub enable: i32,
    pub store: StoreRef,
    pub roles: Vec<Role>,
}

impl CreateUserRequest {
    pub fn new(username: String, password: String, store_id: i64, role: &str, enabled: bool) -> Self {
        Self {
            username,
            password,
            enable: i32::from(enabled),
            store: StoreRef {
                id: store_id,
                title: None,
            },
            roles: vec![Role {
                name: role.to_uppercase(),
            }],
        }
    }
}
