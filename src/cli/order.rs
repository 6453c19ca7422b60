//! Order commands

use std::time::Duration;

use chrono::{Local, NaiveDate};
use colored::Colorize;
use indicatif::ProgressBar;
use log::debug;

use crate::checks::{OrderScope, find_orphaned_orders};
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{confirm, print_page};
use crate::cli::{CommandContext, OrderFields, OrderStatusArg, OutputFormat, PageArgs};
use crate::client::models::{Order, OrderRequest, OrderStatus};
use crate::client::{
    BULK_PAGE_SIZE, ClothesApi, ClothesClient, DEFAULT_MAX_CONCURRENT, MaterialApi, OrderApi,
    PageParams, fetch_all_pages,
};
use crate::error::{ApiError, Result};
use crate::models::{OrderDisplay, OrphanedOrderDisplay};
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::output::print_record;

impl From<OrderStatusArg> for OrderStatus {
    fn from(arg: OrderStatusArg) -> Self {
        match arg {
            OrderStatusArg::Pending => OrderStatus::Pending,
            OrderStatusArg::Completed => OrderStatus::Completed,
            OrderStatusArg::Cancelled => OrderStatus::Cancelled,
        }
    }
}

/// Filters for `order list`
#[derive(Debug, Default)]
pub struct OrderFilters {
    pub user_id: Option<i64>,
    pub store_id: Option<i64>,
    pub material: Option<String>,
    pub size: Option<String>,
}

impl OrderFilters {
    fn apply(self, mut params: PageParams) -> PageParams {
        if let Some(user_id) = self.user_id {
            params = params.user_id(user_id);
        }
        if let Some(store_id) = self.store_id {
            params = params.store_id(store_id);
        }
        if let Some(material) = self.material {
            params = params.material_text(material);
        }
        if let Some(size) = self.size {
            params = params.size_name(size);
        }
        params
    }
}

/// Narrow `params` to what the signed-in user may see.
async fn scoped_params(client: &dyn ClothesApi, params: PageParams) -> Result<PageParams> {
    let user = client.current_user().await?;
    let scope = OrderScope::for_user(&user);
    debug!("Order scope for {}: {:?}", user.username, scope);

    scope.restrict(params).ok_or_else(|| {
        ApiError::Forbidden(format!("{} has no access to orders", user.username)).into()
    })
}

/// Every order in scope, fetched page by page.
pub(crate) async fn fetch_scoped_orders(client: &ClothesClient) -> Result<Vec<Order>> {
    let base = scoped_params(client, PageParams::new()).await?;
    let client = client.clone();

    fetch_all_pages(
        move |page| {
            let client = client.clone();
            let params = base.clone().page(page).size(BULK_PAGE_SIZE);
            async move { client.list_orders(&params).await }
        },
        DEFAULT_MAX_CONCURRENT,
    )
    .await
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

fn parse_date(value: &str) -> Result<String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| ApiError::invalid_field("date", "expected YYYY-MM-DD").into())
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| ApiError::invalid_field(field, "is required").into())
}

fn non_negative(field: &str, value: i64) -> Result<i64> {
    if value >= 0 {
        Ok(value)
    } else {
        Err(ApiError::invalid_field(field, "must not be negative").into())
    }
}

impl OrderFields {
    /// Payload for a new order. Date defaults to today, status to pending.
    fn into_create_request(self) -> Result<OrderRequest> {
        let quantity = required(self.quantity, "quantity")?;
        if quantity <= 0 {
            return Err(ApiError::invalid_field("quantity", "must be greater than zero").into());
        }

        Ok(OrderRequest {
            date_of_order: match self.date {
                Some(ref d) => parse_date(d)?,
                None => today(),
            },
            quantity,
            sold: non_negative("sold", self.sold.unwrap_or(0))?,
            status: self.status.map(OrderStatus::from).unwrap_or(OrderStatus::Pending).code(),
            stock: 0,
            material_text: required(self.material, "material")?,
            size_name: required(self.size, "size")?,
            store_title: self.store,
            user_name: self.user,
        })
    }

    /// Full edit payload: requested values over the current order.
    fn merge(self, current: &Order) -> Result<OrderRequest> {
        let date_of_order = match self.date {
            Some(ref d) => parse_date(d)?,
            None => current.date_of_order.clone().unwrap_or_else(today),
        };

        Ok(OrderRequest {
            date_of_order,
            quantity: non_negative("quantity", self.quantity.unwrap_or(current.quantity))?,
            sold: non_negative("sold", self.sold.unwrap_or(current.sold))?,
            status: self
                .status
                .map(OrderStatus::from)
                .unwrap_or_else(|| current.status())
                .code(),
            stock: current.stock,
            material_text: self.material.unwrap_or_else(|| current.material_text.clone()),
            size_name: self.size.unwrap_or_else(|| current.size_name.clone()),
            store_title: self.store.or_else(|| current.store_title.clone()),
            user_name: self.user.or_else(|| current.user_name.clone()),
        })
    }
}

/// List one page of orders visible to the signed-in user
pub async fn list(opts: &GlobalOptions, filters: OrderFilters, page: PageArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let params = filters.apply(page.to_params(ctx.page_size()));
    let params = scoped_params(&ctx.client, params).await?;

    let result = ctx.client.list_orders(&params).await?;
    print_page::<Order, OrderDisplay>(result, ctx.format)
}

/// Place an order
pub async fn create(opts: &GlobalOptions, fields: OrderFields) -> Result<()> {
    let request = fields.into_create_request()?;

    let ctx = CommandContext::new(opts)?;
    let order = ctx.client.create_order(&request).await?;

    if ctx.format == OutputFormat::Table {
        eprintln!("{} Order #{} placed", "✓".green(), order.id);
    }
    print_record(OrderDisplay::from(order), ctx.format)
}

/// Edit an order
pub async fn edit(opts: &GlobalOptions, order_id: i64, fields: OrderFields) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let current = fetch_scoped_orders(&ctx.client)
        .await?
        .into_iter()
        .find(|o| o.id == order_id)
        .ok_or_else(|| ApiError::NotFound(format!("order #{}", order_id)))?;

    let order = ctx
        .client
        .edit_order(order_id, &fields.merge(&current)?)
        .await?;

    if ctx.format == OutputFormat::Table {
        eprintln!("{} Order #{} updated", "✓".green(), order_id);
    }
    print_record(OrderDisplay::from(order), ctx.format)
}

/// Delete an order
pub async fn delete(opts: &GlobalOptions, order_id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if !confirm(&format!("Delete order #{}?", order_id), yes)? {
        return Ok(());
    }

    ctx.client.delete_order(order_id).await?;

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            format_json(&serde_json::json!({ "deleted": true, "orderId": order_id }))?
        ),
        OutputFormat::Table => eprintln!("{} Order #{} deleted", "✓".green(), order_id),
    }
    Ok(())
}

/// Flag orders whose material or size no longer exists
pub async fn check(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Loading orders and materials...");

    let fetched = futures::try_join!(
        fetch_scoped_orders(&ctx.client),
        ctx.client.list_materials()
    );
    spinner.finish_and_clear();
    let (orders, materials) = fetched?;

    debug!(
        "Checking {} orders against {} materials",
        orders.len(),
        materials.len()
    );
    let orphans = find_orphaned_orders(&orders, &materials);
    let found = orphans.len();

    let display: Vec<OrphanedOrderDisplay> =
        orphans.into_iter().map(OrphanedOrderDisplay::from).collect();

    match ctx.format {
        OutputFormat::Json => display.print(ctx.format)?,
        OutputFormat::Table if found == 0 => {
            println!(
                "{} All {} orders match an existing material",
                "✓".green(),
                orders.len()
            );
        }
        OutputFormat::Table => {
            display.print(ctx.format)?;
            eprintln!(
                "{} {} of {} orders reference missing materials",
                "⚠".yellow(),
                found,
                orders.len()
            );
        }
    }
    Ok(())
}
