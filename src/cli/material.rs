//! Material, stock and size commands

use colored::Colorize;
use log::debug;

use crate::checks::orders_using_material;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{confirm, print_page, run_list_command};
use crate::cli::order::fetch_scoped_orders;
use crate::cli::{CommandContext, OutputFormat, PageArgs};
use crate::client::MaterialApi;
use crate::client::models::{
    CreateMaterialRequest, DistributeRequest, EditMaterialRequest, Material, Order, Size,
};
use crate::error::{ApiError, Result};
use crate::models::{MaterialDisplay, SizeDisplay};
use crate::output::formatters::or_none;
use crate::output::json::format_json;
use crate::output::print_record;

/// Conflict code for a size change blocked by existing orders
const SIZE_IN_USE: &str = "SIZE_IN_USE";

fn require_positive(field: &str, value: i64) -> Result<i64> {
    if value > 0 {
        Ok(value)
    } else {
        Err(ApiError::invalid_field(field, "must be greater than zero").into())
    }
}

/// Filters for `material list`
#[derive(Debug, Default)]
pub struct MaterialFilters {
    pub store: Option<i64>,
    pub text: Option<String>,
    pub size_id: Option<i64>,
}

/// List one page of materials, for one store or across all stores
pub async fn list(opts: &GlobalOptions, filters: MaterialFilters, page: PageArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let mut params = page.to_params(ctx.page_size());
    if let Some(text) = filters.text {
        params = params.text(text);
    }
    if let Some(size_id) = filters.size_id {
        params = params.size_id(size_id);
    }

    let result = match filters.store {
        Some(store_id) => {
            debug!("Listing materials of store {}", store_id);
            ctx.client.list_store_materials(store_id, &params).await?
        }
        None => ctx.client.list_all_materials(&params).await?,
    };

    print_page::<Material, MaterialDisplay>(result, ctx.format)
}

/// Add a material to a store
pub async fn create(
    opts: &GlobalOptions,
    text: String,
    size_id: i64,
    quantity: i64,
    store_id: i64,
) -> Result<()> {
    let request = CreateMaterialRequest {
        text,
        size_id,
        quantity: require_positive("quantity", quantity)?,
        store_id,
    };

    let ctx = CommandContext::new(opts)?;
    let material = ctx.client.create_material(&request).await?;

    if ctx.format == OutputFormat::Table {
        eprintln!("{} Material \"{}\" created", "✓".green(), material.text);
    }
    print_record(MaterialDisplay::from(material), ctx.format)
}

/// Fields the user asked to change
#[derive(Debug, Default)]
pub struct MaterialChanges {
    pub text: Option<String>,
    pub size_id: Option<i64>,
    pub quantity: Option<i64>,
}

impl MaterialChanges {
    fn merge(self, current: &Material) -> Result<EditMaterialRequest> {
        let size_id = match self.size_id.or(current.size_id) {
            Some(id) => id,
            None => {
                return Err(ApiError::invalid_field(
                    "size_id",
                    "the material has no size; pass --size-id",
                )
                .into());
            }
        };
        let quantity = match self.quantity {
            Some(q) => require_positive("quantity", q)?,
            None => current.quantity,
        };

        Ok(EditMaterialRequest {
            text: self.text.unwrap_or_else(|| current.text.clone()),
            size_id,
            quantity,
        })
    }
}

/// Refuse a size change while orders still reference the current size.
fn check_size_change(current: &Material, orders: &[Order]) -> Result<()> {
    let in_use = orders_using_material(orders, current);
    if in_use == 0 {
        return Ok(());
    }

    Err(ApiError::Conflict {
        code: Some(SIZE_IN_USE.to_string()),
        message: format!(
            "{} order(s) use \"{}\" in size {}; delete them or create a new material instead",
            in_use,
            current.text,
            or_none(current.size_name.as_deref())
        ),
    }
    .into())
}

/// Edit a material
pub async fn edit(opts: &GlobalOptions, material_id: i64, changes: MaterialChanges) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let current = ctx
        .client
        .list_materials()
        .await?
        .into_iter()
        .find(|m| m.id == material_id)
        .ok_or_else(|| ApiError::NotFound(format!("material #{}", material_id)))?;

    if changes.size_id.is_some_and(|id| current.size_id != Some(id)) {
        debug!("Size change requested for material #{}; checking orders", material_id);
        let orders = fetch_scoped_orders(&ctx.client).await?;
        check_size_change(&current, &orders)?;
    }

    let material = ctx
        .client
        .edit_material(material_id, &changes.merge(&current)?)
        .await?;

    if ctx.format == OutputFormat::Table {
        eprintln!("{} Material #{} updated", "✓".green(), material_id);
    }
    print_record(MaterialDisplay::from(material), ctx.format)
}

/// Delete a material
pub async fn delete(opts: &GlobalOptions, material_id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if !confirm(&format!("Delete material #{}?", material_id), yes)? {
        return Ok(());
    }

    ctx.client.delete_material(material_id).await?;

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            format_json(&serde_json::json!({ "deleted": true, "materialId": material_id }))?
        ),
        OutputFormat::Table => eprintln!("{} Material #{} deleted", "✓".green(), material_id),
    }
    Ok(())
}

/// Move stock of a material to another store
pub async fn distribute(
    opts: &GlobalOptions,
    material_id: i64,
    receiver_store_id: i64,
    quantity: i64,
) -> Result<()> {
    let request = DistributeRequest {
        receiver_store_id,
        quantity: require_positive("quantity", quantity)?,
    };

    let ctx = CommandContext::new(opts)?;
    ctx.client.distribute_material(material_id, &request).await?;

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            format_json(&serde_json::json!({
                "materialId": material_id,
                "receiverStoreId": receiver_store_id,
                "quantity": quantity,
            }))?
        ),
        OutputFormat::Table => eprintln!(
            "{} Moved {} of material #{} to store #{}",
            "✓".green(),
            quantity,
            material_id,
            receiver_store_id
        ),
    }
    Ok(())
}

/// Run the size list command
pub async fn list_sizes(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<Size, SizeDisplay, _, _>(opts, "sizes", |client| async move {
        client.list_sizes().await
    })
    .await
}
