//! Display models for CLI output
//!
//! API response types are converted into display rows with stable column
//! names for tables and flat field names for JSON.

pub mod display;

pub use display::{
    MaterialDisplay, OrderDisplay, OrphanedOrderDisplay, SizeDisplay, StoreDisplay, UserDisplay,
};
