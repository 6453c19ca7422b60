//! Clothes Manager API client
//!
//! Layers, bottom up: [`transport`] performs one HTTP round trip,
//! [`stages`] hold the pure credential logic applied before and after it,
//! [`gateway`] runs the pipeline against the shared session, and
//! [`ClothesClient`] exposes the typed API on top.

pub mod api;
pub mod clothes;
pub mod gateway;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod parallel;
pub mod stages;
pub mod transport;

pub use api::{AuthApi, DashboardApi, MaterialApi, OrderApi, StoreApi, UserApi};
pub use clothes::ClothesClient;
pub use gateway::{Gateway, GatewayEvent};
pub use pagination::{BULK_PAGE_SIZE, Page, PageParams};
pub use parallel::{DEFAULT_MAX_CONCURRENT, fetch_all_pages};
pub use transport::ReqwestTransport;

/// The full service surface.
pub trait ClothesApi:
    AuthApi + UserApi + StoreApi + MaterialApi + OrderApi + DashboardApi + Send + Sync
{
}

impl<T> ClothesApi for T where
    T: AuthApi + UserApi + StoreApi + MaterialApi + OrderApi + DashboardApi + Send + Sync
{
}
