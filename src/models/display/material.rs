//! Material and size display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{Material, Size};
use crate::output::formatters::or_none;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MaterialDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "DESCRIPTION")]
    pub text: String,

    #[tabled(rename = "SIZE")]
    pub size: String,

    #[tabled(rename = "QTY")]
    pub quantity: i64,

    #[tabled(rename = "STORE")]
    pub store: String,
}

impl From<Material> for MaterialDisplay {
    fn from(material: Material) -> Self {
        Self {
            id: material.id,
            text: material.text,
            size: or_none(material.size_name.as_deref()),
            quantity: material.quantity,
            store: or_none(material.store_title.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SizeDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,
}

impl From<Size> for SizeDisplay {
    fn from(size: Size) -> Self {
        Self {
            id: size.id,
            name: size.name,
        }
    }
}
