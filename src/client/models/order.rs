//! Order models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order lifecycle as encoded by the service (1 pending, 2 completed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => OrderStatus::Pending,
            2 => OrderStatus::Completed,
            _ => OrderStatus::Cancelled,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            OrderStatus::Pending => 1,
            OrderStatus::Completed => 2,
            OrderStatus::Cancelled => 3,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

/// Order placed against a material in a store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,

    #[serde(default)]
    pub date_of_order: Option<String>,

    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub sold: i64,

    #[serde(default)]
    pub status: i32,

    #[serde(default)]
    pub stock: i64,

    #[serde(default)]
    pub material_text: String,

    #[serde(default)]
    pub size_name: String,

    #[serde(default)]
    pub store_title: Option<String>,

    #[serde(default)]
    pub user_name: Option<String>,
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        OrderStatus::from_code(self.status)
    }
}

/// Create and edit payload
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub date_of_order: String,
    pub quantity: i64,
    pub sold: i64,
    pub status: i32,
    pub stock: i64,
    pub material_text: String,
    pub size_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}
