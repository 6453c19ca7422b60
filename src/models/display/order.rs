//! Order display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Order;
use crate::output::formatters::{format_date, or_none};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct OrderDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "MATERIAL")]
    pub material: String,

    #[tabled(rename = "SIZE")]
    pub size: String,

    #[tabled(rename = "QTY")]
    pub quantity: i64,

    #[tabled(rename = "STOCK")]
    pub stock: i64,

    #[tabled(rename = "STORE")]
    pub store: String,

    #[tabled(rename = "USER")]
    pub user: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<Order> for OrderDisplay {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            date: format_date(order.date_of_order.as_deref()),
            status: order.status().to_string(),
            material: order.material_text,
            size: order.size_name,
            quantity: order.quantity,
            stock: order.stock,
            store: or_none(order.store_title.as_deref()),
            user: or_none(order.user_name.as_deref()),
        }
    }
}
