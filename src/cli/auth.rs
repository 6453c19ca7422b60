//! Sign-in, setup and password commands

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, SetupArgs};
use crate::client::AuthApi;
use crate::client::models::{ChangePasswordRequest, Credentials, SetupRequest};
use crate::error::Result;
use crate::output::formatters::format_remaining;

pub(crate) fn prompt_text(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .interact_text()?),
    }
}

pub(crate) fn prompt_secret(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Password::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .interact()?),
    }
}

/// Run the login command
pub async fn login(
    opts: &GlobalOptions,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let username = prompt_text(username, "Username")?;
    let password = prompt_secret(password, "Password")?;

    ctx.client
        .login(&Credentials {
            username: username.clone(),
            password,
        })
        .await?;

    println!("{} Signed in as {}", "✓".green(), username.bold());

    let remaining = ctx.client.gateway().session().time_until_expiry();
    if remaining > 0 {
        println!("  Session valid for {}", format_remaining(remaining));
    }
    Ok(())
}

/// Run the logout command. Purely local; the service is not contacted.
pub async fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.client.logout().await?;
    println!("{} Signed out", "✓".green());
    Ok(())
}

/// Run first-time setup
pub async fn setup(opts: &GlobalOptions, args: SetupArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let status = ctx.client.setup_status().await?;
    if !status.setup_required {
        println!("{} Service is already set up", "✓".green());
        println!("  → Run `clothop login` to sign in");
        return Ok(());
    }

    println!("{}", "Welcome to Clothes Manager!".bold().green());
    println!("Create the first administrator and store.\n");

    let username = prompt_text(args.username, "Administrator username")?;
    let password = match args.password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Administrator password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };
    let store_title = prompt_text(args.store_title, "Store title")?;
    let store_address = prompt_text(args.store_address, "Store address")?;

    debug!("Submitting setup for store {}", store_title);
    ctx.client
        .setup(&SetupRequest::new(username, password, store_title, store_address))
        .await?;

    println!("{} Setup complete", "✓".green());
    println!("  → Run `clothop login` to sign in");
    Ok(())
}

/// Change the signed-in user's password
pub async fn change_password(
    opts: &GlobalOptions,
    current: Option<String>,
    new_password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let current_password = prompt_secret(current, "Current password")?;
    let new_password = match new_password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("New password")
            .with_confirmation("Repeat new password", "Passwords do not match")
            .interact()?,
    };

    ctx.client
        .change_password(&ChangePasswordRequest {
            current_password,
            new_password,
        })
        .await?;

    println!("{} Password changed", "✓".green());
    Ok(())
}
