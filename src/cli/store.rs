//! Store management commands

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{confirm, run_list_command};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::StoreApi;
use crate::client::models::{Store, StoreRequest};
use crate::error::Result;
use crate::models::StoreDisplay;
use crate::output::json::format_json;
use crate::output::print_record;

/// Run the store list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<Store, StoreDisplay, _, _>(opts, "stores", |client| async move {
        client.list_stores().await
    })
    .await
}

/// Show one store
pub async fn get(opts: &GlobalOptions, store_id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let store = ctx.client.get_store(store_id).await?;
    print_record(StoreDisplay::from(store), ctx.format)
}

/// Create a store
pub async fn create(
    opts: &GlobalOptions,
    title: String,
    address: String,
    disabled: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let store = ctx
        .client
        .create_store(&StoreRequest::new(title, address, !disabled))
        .await?;

    if ctx.format == OutputFormat::Table {
        eprintln!("{} Store \"{}\" created", "✓".green(), store.title);
    }
    print_record(StoreDisplay::from(store), ctx.format)
}

/// Fields the user asked to change
#[derive(Debug, Default)]
pub struct StoreChanges {
    pub title: Option<String>,
    pub address: Option<String>,
    pub active: Option<bool>,
}

impl StoreChanges {
    /// Full edit payload: requested values over the current ones.
    fn merge(self, current: &Store) -> StoreRequest {
        StoreRequest::new(
            self.title.unwrap_or_else(|| current.title.clone()),
            self.address
                .or_else(|| current.address.clone())
                .unwrap_or_default(),
            self.active.unwrap_or_else(|| current.is_active()),
        )
    }
}

/// Edit a store
pub async fn edit(opts: &GlobalOptions, store_id: i64, changes: StoreChanges) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let current = ctx.client.get_store(store_id).await?;
    let store = ctx
        .client
        .edit_store(store_id, &changes.merge(&current))
        .await?;

    if ctx.format == OutputFormat::Table {
        eprintln!("{} Store #{} updated", "✓".green(), store_id);
    }
    print_record(StoreDisplay::from(store), ctx.format)
}

/// Delete a store
pub async fn delete(opts: &GlobalOptions, store_id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let store = ctx.client.get_store(store_id).await?;
    if !confirm(&format!("Delete store \"{}\"?", store.title), yes)? {
        return Ok(());
    }

    ctx.client.delete_store(store_id).await?;

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            format_json(&serde_json::json!({
                "deleted": true,
                "storeId": store_id,
                "title": store.title,
            }))?
        ),
        OutputFormat::Table => eprintln!("{} Store \"{}\" deleted", "✓".green(), store.title),
    }
    Ok(())
}
