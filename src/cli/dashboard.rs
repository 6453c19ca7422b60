//! Dashboard command

use log::debug;
use serde::Serialize;

use crate::checks::count_active_stores;
use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::Dashboard;
use crate::client::{DashboardApi, StoreApi};
use crate::error::{Error, Result};
use crate::output::formatters::NONE;
use crate::output::json::format_json;
use crate::output::table::format_pairs;

#[derive(Debug, Serialize)]
struct DashboardSummary {
    users: u64,
    materials: u64,
    sizes: u64,
    orders: u64,
    stores: Option<u64>,
}

impl From<Dashboard> for DashboardSummary {
    fn from(d: Dashboard) -> Self {
        Self {
            users: d.user,
            materials: d.materials,
            sizes: d.sizes,
            orders: d.orders,
            stores: d.stores,
        }
    }
}

impl DashboardSummary {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let stores = self
            .stores
            .map(|n| n.to_string())
            .unwrap_or_else(|| NONE.to_string());
        vec![
            ("Active users", self.users.to_string()),
            ("Materials", self.materials.to_string()),
            ("Sizes", self.sizes.to_string()),
            ("Orders", self.orders.to_string()),
            ("Active stores", stores),
        ]
    }
}

/// Run the dashboard command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let mut summary = DashboardSummary::from(ctx.client.dashboard().await?);

    if summary.stores.is_none() {
        // Older services leave the store counter out
        match ctx.client.list_stores().await {
            Ok(stores) => summary.stores = Some(count_active_stores(&stores) as u64),
            Err(Error::Api(e)) if !e.is_auth_rejected() => {
                debug!("Store count unavailable: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&summary)?),
        OutputFormat::Table => println!("{}", format_pairs(&summary.pairs())),
    }
    Ok(())
}
