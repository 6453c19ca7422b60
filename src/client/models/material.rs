//! Material and size models

use serde::{Deserialize, Serialize};

/// Garment size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Size {
    pub id: i64,
    pub name: String,
}

/// Stock of one garment in one size at one store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: i64,

    /// Garment description
    pub text: String,

    #[serde(default)]
    pub size_id: Option<i64>,

    #[serde(default)]
    pub size_name: Option<String>,

    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub store_id: Option<i64>,

    #[serde(default)]
    pub store_title: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialRequest {
    pub text: String,
    pub size_id: i64,
    pub quantity: i64,
    pub store_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMaterialRequest {
    pub text: String,
    pub size_id: i64,
    pub quantity: i64,
}

/// Move stock from one store to another
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributeRequest {
    pub receiver_store_id: i64,
    pub quantity: i64,
}
