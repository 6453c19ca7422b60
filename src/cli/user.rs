//! User management commands

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::auth::prompt_secret;
use crate::cli::handlers::{confirm, run_list_command};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::UserApi;
use crate::client::models::{CreateUserRequest, LOCAL_ADMIN, SUPER_ADMIN, User};
use crate::error::{ApiError, Result};
use crate::models::UserDisplay;
use crate::output::json::format_json;
use crate::output::print_record;

/// Run the user list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    run_list_command::<User, UserDisplay, _, _>(opts, "users", |client| async move {
        client.list_users().await
    })
    .await
}

/// Show the signed-in user
pub async fn me(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let user = ctx.client.current_user().await?;
    print_record(UserDisplay::from(user), ctx.format)
}

fn validate_role(role: &str) -> Result<String> {
    let role = role.trim().to_uppercase();
    if role == SUPER_ADMIN || role == LOCAL_ADMIN {
        Ok(role)
    } else {
        Err(ApiError::invalid_field(
            "role",
            format!("expected {} or {}, got '{}'", SUPER_ADMIN, LOCAL_ADMIN, role),
        )
        .into())
    }
}

/// Create a user
pub async fn create(
    opts: &GlobalOptions,
    username: String,
    password: Option<String>,
    store_id: i64,
    role: String,
    disabled: bool,
) -> Result<()> {
    let role = validate_role(&role)?;
    let ctx = CommandContext::new(opts)?;
    let password = prompt_secret(password, "Password for the new user")?;

    let user = ctx
        .client
        .create_user(&CreateUserRequest::new(
            username, password, store_id, &role, !disabled,
        ))
        .await?;

    if ctx.format == OutputFormat::Table {
        eprintln!("{} User \"{}\" created", "✓".green(), user.username);
    }
    print_record(UserDisplay::from(user), ctx.format)
}

/// Delete a user
pub async fn delete(opts: &GlobalOptions, user_id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if !confirm(&format!("Delete user #{}?", user_id), yes)? {
        return Ok(());
    }

    ctx.client.delete_user(user_id).await?;

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            format_json(&serde_json::json!({ "deleted": true, "userId": user_id }))?
        ),
        OutputFormat::Table => eprintln!("{} User #{} deleted", "✓".green(), user_id),
    }
    Ok(())
}
