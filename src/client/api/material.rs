//! Material API trait

use async_trait::async_trait;

use crate::client::models::{
    CreateMaterialRequest, DistributeRequest, EditMaterialRequest, Material, Size,
};
use crate::client::pagination::{Page, PageParams};
use crate::error::Result;

/// Materials, sizes and stock movement
#[async_trait]
pub trait MaterialApi: Send + Sync {
    /// Every material visible to the caller, unpaged.
    async fn list_materials(&self) -> Result<Vec<Material>>;

    /// One page of a single store's materials, filtered by `text` and `size_id`.
    async fn list_store_materials(
        &self,
        store_id: i64,
        params: &PageParams,
    ) -> Result<Page<Material>>;

    /// One page across all stores, filtered by `text` and `size_id`.
    async fn list_all_materials(&self, params: &PageParams) -> Result<Page<Material>>;

    async fn create_material(&self, request: &CreateMaterialRequest) -> Result<Material>;

    async fn edit_material(
        &self,
        material_id: i64,
        request: &EditMaterialRequest,
    ) -> Result<Material>;

    async fn delete_material(&self, material_id: i64) -> Result<()>;

    /// Move `quantity` of a material to another store.
    async fn distribute_material(
        &self,
        material_id: i64,
        request: &DistributeRequest,
    ) -> Result<()>;

    async fn list_sizes(&self) -> Result<Vec<Size>>;
}
