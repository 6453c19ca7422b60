//! Store display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Store;
use crate::output::formatters::or_none;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct StoreDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "ADDRESS")]
    pub address: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<Store> for StoreDisplay {
    fn from(store: Store) -> Self {
        let status = if store.is_active() { "Active" } else { "Inactive" };
        Self {
            id: store.id,
            address: or_none(store.address.as_deref()),
            title: store.title,
            status: status.to_string(),
        }
    }
}
