//! Status command implementation

use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::config::{Config, ExpirySource};
use crate::error::Result;
use crate::output::formatters::format_remaining;

/// Show configuration and session status. Makes no network calls.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "ClothOp Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not found, using defaults)".dimmed()
        );
    }

    let config = Config::load_at(opts.config_ref())?.with_api_url(opts.api_url_ref());
    println!("API URL: {}", config.api_url.cyan());

    let expiry = match config.session.expiry {
        ExpirySource::Claim => "token claim".to_string(),
        ExpirySource::Lease => format!("{} minute lease", config.session.lease_minutes),
    };
    println!("Expiry: {} (skew {}s)", expiry, config.session.skew_secs);
    println!(
        "Session file: {}",
        config.session.resolve_path()?.display().to_string().cyan()
    );
    println!();

    let session = CommandContext::session_for(&config)?;
    match (session.get_token(), session.is_authenticated()) {
        (None, _) => {
            println!("{} Not signed in", "○".dimmed());
            println!("  → Run `clothop login` to sign in");
        }
        (Some(_), false) => {
            println!("{} Session expired", "⚠".yellow());
            println!("  → Run `clothop login` to sign in again");
        }
        (Some(_), true) => {
            println!(
                "{} Signed in (expires in {})",
                "✓".green(),
                format_remaining(session.time_until_expiry())
            );
        }
    }

    Ok(())
}
