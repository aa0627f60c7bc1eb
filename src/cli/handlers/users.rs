//! User listing handler (admin view)

use super::common::HandlerContext;
use crate::cli::output::OutputFormatter;
use crate::error::Result;
use crate::routes::Route;
use std::path::Path;

/// Handle `user list`
pub async fn handle_user_list(
    search: Option<String>,
    config_path: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(config_path)?;
    ctx.require_route(Route::Users).await?;

    let users = ctx.users().list(search.as_deref()).await?;

    if formatter.is_json() {
        return formatter.json(&users);
    }

    if users.is_empty() {
        formatter.info("No users match");
        return Ok(());
    }

    formatter.line(&format!("Users ({}):", users.len()));
    for user in &users {
        formatter.line(&format!(
            "#{:<5} {:<20} {:<30} {}",
            user.id, user.username, user.email, user.role
        ));
    }
    Ok(())
}
