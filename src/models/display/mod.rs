//! Display model implementations for table and JSON output

mod check;
mod material;
mod order;
mod store;
mod user;

pub use check::OrphanedOrderDisplay;
pub use material::{MaterialDisplay, SizeDisplay};
pub use order::OrderDisplay;
pub use store::StoreDisplay;
pub use user::UserDisplay;
