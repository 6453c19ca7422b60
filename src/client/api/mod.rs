//! API trait definitions split by responsibility
//!
//! The service surface is organized into focused sub-traits:
//! - [`AuthApi`] - Sign-in, setup and password operations
//! - [`UserApi`] - Account management
//! - [`StoreApi`] - Store management
//! - [`MaterialApi`] - Materials, sizes and stock distribution
//! - [`OrderApi`] - Orders
//! - [`DashboardApi`] - Summary counters
//!
//! The [`ClothesApi`](super::ClothesApi) super-trait combines them all.

mod auth;
mod dashboard;
mod material;
mod order;
mod store;
mod user;

pub use auth::AuthApi;
pub use dashboard::DashboardApi;
pub use material::MaterialApi;
pub use order::OrderApi;
pub use store::StoreApi;
pub use user::UserApi;
