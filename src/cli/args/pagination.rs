//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::PageParams;

/// Shared pagination arguments for paged list commands.
///
/// Flatten this into any command that supports pagination:
/// ```ignore
/// List {
///     #[command(flatten)]
///     page: PageArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PageArgs {
    /// Page number (0-indexed)
    #[arg(long, short = 'p', default_value_t = 0)]
    pub page: usize,

    /// Results per page (defaults to the configured page size)
    #[arg(long, short = 'n')]
    pub size: Option<usize>,
}

impl PageArgs {
    /// Convert CLI args to API page params.
    pub fn to_params(&self, default_size: usize) -> PageParams {
        PageParams::new()
            .page(self.page)
            .size(self.size.unwrap_or(default_size))
    }
}
