//! Shared command handler patterns

pub mod list;

pub use list::{confirm, print_page, run_list_command};
