//! Store models

use serde::{Deserialize, Serialize};

/// Warehouse or shop holding materials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,

    pub title: String,

    #[serde(default)]
    pub address: Option<String>,

    /// Legacy activity flag: 1 active
    #[serde(default)]
    pub enable: Option<i32>,

    /// `ACTIVE` or `INACTIVE`
    #[serde(default)]
    pub status: Option<String>,
}

impl Store {
    /// Active under either the status field or the legacy flag.
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("ACTIVE") || self.enable == Some(1)
    }
}

/// Create and edit payload
#[derive(Debug, Clone, Serialize)]
pub struct StoreRequest {
    pub title: String,
    pub address: String,
    pub enable: i32,
}

impl StoreRequest {
    pub fn new(title: String, address: String, enabled: bool) -> Self {
        Self {
            title,
            address,
            enable: i32::from(enabled),
        }
    }
}
