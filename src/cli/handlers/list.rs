//! Generic list command handlers
//!
//! Most list commands follow the same flow:
//! 1. Create command context
//! 2. Fetch data
//! 3. Convert to display type
//! 4. Print output

use std::future::Future;

use colored::Colorize;
use dialoguer::Confirm;
use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::{ClothesClient, Page};
use crate::error::Result;
use crate::output::Formattable;
use crate::output::json::format_json;

/// Run a list command with the common fetch → display → print pattern.
///
/// # Example
///
/// ```ignore
/// run_list_command::<Size, SizeDisplay, _, _>(opts, "sizes", |client| async move {
///     client.list_sizes().await
/// })
/// .await
/// ```
pub async fn run_list_command<T, D, Fut, F>(
    opts: &GlobalOptions,
    resource_name: &str,
    fetcher: F,
) -> Result<()>
where
    D: From<T> + Tabled + Serialize,
    Fut: Future<Output = Result<Vec<T>>>,
    F: FnOnce(ClothesClient) -> Fut,
{
    let ctx = CommandContext::new(opts)?;

    debug!("Fetching {}", resource_name);
    let items = fetcher(ctx.client.clone()).await?;
    debug!("Fetched {} {}", items.len(), resource_name);

    let display_items: Vec<D> = items.into_iter().map(D::from).collect();
    display_items.print(ctx.format)?;

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageOutput<D> {
    content: Vec<D>,
    number: usize,
    total_pages: usize,
}

/// Print one page of results.
///
/// Tables get a page footer on stderr; JSON keeps the page fields alongside the content.
pub fn print_page<T, D>(page: Page<T>, format: OutputFormat) -> Result<()>
where
    D: From<T> + Tabled + Serialize,
{
    let has_next = page.has_next();
    let output = PageOutput {
        content: page.content.into_iter().map(D::from).collect::<Vec<D>>(),
        number: page.number,
        total_pages: page.total_pages,
    };

    match format {
        OutputFormat::Json => println!("{}", format_json(&output)?),
        OutputFormat::Table => {
            output.content.print(format)?;
            if output.total_pages > 0 {
                let mut footer = format!("Page {} of {}", output.number + 1, output.total_pages);
                if has_next {
                    footer.push_str(&format!(" (next: --page {})", output.number + 1));
                }
                eprintln!("{}", footer.dimmed());
            }
        }
    }
    Ok(())
}

/// Ask before a destructive action unless `yes` was given.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    eprintln!("{} {} This cannot be undone.", "⚠".yellow(), prompt);
    let confirmed = Confirm::new()
        .with_prompt("Confirm deletion?")
        .default(false)
        .interact()?;

    if !confirmed {
        eprintln!("Cancelled.");
    }
    Ok(confirmed)
}
