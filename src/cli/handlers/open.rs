//! Path navigation handler
//!
//! `deskctl open <path>` is the CLI analog of typing a URL: the path is
//! parsed into a route, the guard resolves it against the current auth
//! state, and whatever view the resolution lands on is rendered. Redirects
//! are reported rather than hidden.

use super::common::HandlerContext;
use super::tickets::render_ticket;
use crate::cli::output::OutputFormatter;
use crate::core::permissions;
use crate::error::{DeskError, Result};
use crate::routes::{self, Navigation, Route};
use std::path::Path;

/// Handle the `open` command
pub async fn handle_open(
    path: &str,
    config_path: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let target = Route::parse(path);

    let ctx = HandlerContext::new(config_path)?;
    let mut auth = ctx.auth_context();
    let state = auth.initialize().await?.clone();

    let (route, redirected_from) = match routes::resolve(target, &state) {
        Navigation::View {
            route,
            redirected_from,
        } => (route, redirected_from),
        // initialize() never leaves the state Unknown
        Navigation::Pending => return Err(DeskError::custom("auth state unresolved")),
    };

    if let Some(origin) = redirected_from {
        formatter.info(&format!("{origin} redirected to {route}"));
    }

    match route {
        Route::Login => {
            formatter.line("Login");
            formatter.info("Run 'deskctl login' to authenticate");
        },
        Route::Register => {
            formatter.line("Register");
            formatter.info("Run 'deskctl register' to create an account");
        },
        Route::Tickets => {
            let user = state
                .user()
                .cloned()
                .ok_or_else(|| DeskError::custom("tickets view reached while anonymous"))?;
            let tickets = permissions::visible_tickets(&user, ctx.tickets().list().await?);
            if formatter.is_json() {
                return formatter.json(&tickets);
            }
            formatter.line(&format!("Tickets ({}):", tickets.len()));
            for ticket in &tickets {
                formatter.line(&format!(
                    "#{:<5} [{}] {}",
                    ticket.id, ticket.status, ticket.title
                ));
            }
        },
        Route::TicketDetail(id) => {
            let ticket = ctx.tickets().get(id).await?;
            if formatter.is_json() {
                return formatter.json(&ticket);
            }
            render_ticket(&ticket, formatter);
        },
        Route::TicketNew => {
            formatter.line("New ticket");
            formatter.info("Run 'deskctl ticket new' to create a ticket");
        },
        Route::Users => {
            let users = ctx.users().list(None).await?;
            if formatter.is_json() {
                return formatter.json(&users);
            }
            formatter.line(&format!("Users ({}):", users.len()));
            for user in &users {
                formatter.line(&format!(
                    "#{:<5} {:<20} {}",
                    user.id, user.username, user.role
                ));
            }
        },
        // Root always redirects, so it can never be the landed route.
        Route::Root => unreachable!("root route always redirects"),
    }

    Ok(())
}
