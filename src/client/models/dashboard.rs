//! Dashboard counters

use serde::{Deserialize, Serialize};

/// Summary counters shown on the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dashboard {
    /// Active users
    #[serde(default)]
    pub user: u64,

    #[serde(default)]
    pub materials: u64,

    #[serde(default)]
    pub sizes: u64,

    #[serde(default)]
    pub orders: u64,

    /// Active stores, when the service reports it
    #[serde(default)]
    pub stores: Option<u64>,
}
