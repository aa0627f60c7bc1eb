//! Authentication command handlers: login, register, logout, whoami

use super::common::HandlerContext;
use crate::auth::AuthState;
use crate::cli::output::OutputFormatter;
use crate::core::User;
use crate::error::{DeskError, Result};
use crate::routes::role_home;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use std::path::Path;

/// Handle the `login` command
///
/// Prompts for missing credentials, refuses empty ones locally (no request
/// is issued), and reports the role home view on success.
pub async fn handle_login(
    username: Option<String>,
    password: Option<String>,
    config_path: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    let username = match username {
        Some(value) => value,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Username")
            .allow_empty(true)
            .interact_text()?,
    };
    let password = match password {
        Some(value) => value,
        None => Password::with_theme(&theme)
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?,
    };

    // Local validation: an empty field never reaches the server.
    if username.trim().is_empty() || password.is_empty() {
        return Err(DeskError::InvalidInput(
            "Username and password are required".to_string(),
        ));
    }

    let ctx = HandlerContext::new(config_path)?;
    let mut auth = ctx.auth_context();

    if let AuthState::Authenticated(user) = auth.initialize().await? {
        if formatter.is_json() {
            formatter.json(&unchanged_session_json(user))?;
        } else {
            formatter.info(&format!(
                "Already logged in as '{}'; your home view is {}",
                user.username,
                role_home(user.role)
            ));
        }
        return Ok(());
    }

    let user = auth.login(&username, &password).await?;

    formatter.success(&format!(
        "Logged in as '{}' ({})",
        user.username, user.role
    ));
    formatter.info(&format!("Home view: {}", role_home(user.role)));

    if formatter.is_json() {
        formatter.json(&serde_json::json!({
            "status": "success",
            "user": user,
            "home": role_home(user.role).path(),
        }))?;
    }

    Ok(())
}

/// Handle the `register` command
///
/// All fields are required and the password must match its confirmation;
/// both checks run locally before any request. On success the new user is
/// already authenticated.
pub async fn handle_register(
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    confirm: Option<String>,
    config_path: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    let username = match username {
        Some(value) => value,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Username")
            .allow_empty(true)
            .interact_text()?,
    };
    let email = match email {
        Some(value) => value,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Email")
            .allow_empty(true)
            .interact_text()?,
    };
    let password = match password {
        Some(value) => value,
        None => Password::with_theme(&theme)
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?,
    };
    let confirm = match confirm {
        Some(value) => value,
        None => Password::with_theme(&theme)
            .with_prompt("Confirm password")
            .allow_empty_password(true)
            .interact()?,
    };

    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(DeskError::InvalidInput(
            "Username, email, and password are required".to_string(),
        ));
    }
    if password != confirm {
        return Err(DeskError::InvalidInput("Пароли не совпадают".to_string()));
    }

    let ctx = HandlerContext::new(config_path)?;
    let mut auth = ctx.auth_context();

    if let AuthState::Authenticated(user) = auth.initialize().await? {
        if formatter.is_json() {
            formatter.json(&unchanged_session_json(user))?;
        } else {
            formatter.info(&format!(
                "Already logged in as '{}'; log out before registering a new account",
                user.username
            ));
        }
        return Ok(());
    }

    let user = auth.register(&username, &email, &password).await?;

    formatter.success(&format!(
        "Registered and logged in as '{}' ({})",
        user.username, user.role
    ));
    formatter.info(&format!("Home view: {}", role_home(user.role)));

    if formatter.is_json() {
        formatter.json(&serde_json::json!({
            "status": "success",
            "user": user,
            "home": role_home(user.role).path(),
        }))?;
    }

    Ok(())
}

/// JSON document for a login/register attempt that found an existing session
///
/// The session is left as it is, but `--json` callers still get a document,
/// like every other outcome of these commands.
fn unchanged_session_json(user: &User) -> serde_json::Value {
    serde_json::json!({
        "status": "unchanged",
        "user": user,
        "home": role_home(user.role).path(),
    })
}

/// Handle the `logout` command
pub fn handle_logout(config_path: Option<&Path>, formatter: &OutputFormatter) -> Result<()> {
    let ctx = HandlerContext::new(config_path)?;
    let mut auth = ctx.auth_context();
    auth.logout()?;

    formatter.success("Logged out");
    if formatter.is_json() {
        formatter.json(&serde_json::json!({ "status": "success" }))?;
    }
    Ok(())
}

/// Handle the `whoami` command
pub async fn handle_whoami(config_path: Option<&Path>, formatter: &OutputFormatter) -> Result<()> {
    let ctx = HandlerContext::new(config_path)?;
    let mut auth = ctx.auth_context();

    match auth.initialize().await? {
        AuthState::Authenticated(user) => {
            if formatter.is_json() {
                formatter.json(user)?;
            } else {
                formatter.line(&format!(
                    "{} <{}> ({})",
                    user.username, user.email, user.role
                ));
            }
        },
        _ => {
            formatter.info("Not logged in");
            if formatter.is_json() {
                formatter.json(&serde_json::json!({ "user": null }))?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;

    #[test]
    fn test_unchanged_session_document_carries_user_and_home() {
        let user = User {
            id: 9,
            username: "root".to_string(),
            email: "root@example.com".to_string(),
            role: Role::Admin,
        };

        let value = unchanged_session_json(&user);
        assert_eq!(value["status"], "unchanged");
        assert_eq!(value["user"]["username"], "root");
        assert_eq!(value["home"], "/users");
    }
}
