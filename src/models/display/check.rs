//! Consistency check display model

use serde::Serialize;
use tabled::Tabled;

use crate::checks::OrphanedOrder;
use crate::output::formatters::or_none;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct OrphanedOrderDisplay {
    #[tabled(rename = "ORDER")]
    pub order_id: i64,

    #[tabled(rename = "MATERIAL")]
    pub material: String,

    #[tabled(rename = "SIZE")]
    pub size: String,

    #[tabled(rename = "STORE")]
    pub store: String,

    #[tabled(rename = "PROBLEM")]
    pub problem: String,
}

impl From<OrphanedOrder> for OrphanedOrderDisplay {
    fn from(orphan: OrphanedOrder) -> Self {
        Self {
            order_id: orphan.order_id,
            problem: orphan.reason.to_string(),
            store: or_none(orphan.store_title.as_deref()),
            material: orphan.material_text,
            size: orphan.size_name,
        }
    }
}
