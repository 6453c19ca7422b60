//! Clothes Manager API data models
//!
//! Domain types exchanged with the service, organized by resource.

mod auth;
mod dashboard;
mod material;
mod order;
mod store;
mod user;

pub use auth::{ChangePasswordRequest, Credentials, LoginResponse, SetupRequest, SetupStatus};
pub use dashboard::Dashboard;
pub use material::{CreateMaterialRequest, DistributeRequest, EditMaterialRequest, Material, Size};
pub use order::{Order, OrderRequest, OrderStatus};
pub use store::{Store, StoreRequest};
pub use user::{CreateUserRequest, LOCAL_ADMIN, SUPER_ADMIN, User};
#[cfg(test)]
pub use user::{Role, StoreRef};
