//! Ticket command handlers
//!
//! Each handler guards its route first, then calls the ticket service and
//! renders the result. Nothing here holds state between invocations; every
//! view is fetched fresh from the server.

use super::common::{HandlerContext, validation};
use crate::cli::output::OutputFormatter;
use crate::core::{Ticket, TicketDraftBuilder, TicketPatch, TicketStatus, permissions};
use crate::error::{DeskError, Result};
use crate::routes::Route;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::Path;

/// Handle `ticket list`
pub async fn handle_ticket_list(
    config_path: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(config_path)?;
    let user = ctx.require_route(Route::Tickets).await?;

    let tickets = ctx.tickets().list().await?;
    // The server already scopes the listing by role; filtering again keeps
    // foreign tickets out of output even against a misbehaving server.
    let tickets = permissions::visible_tickets(&user, tickets);

    if formatter.is_json() {
        return formatter.json(&tickets);
    }

    if tickets.is_empty() {
        formatter.info("No tickets");
        return Ok(());
    }

    formatter.line(&format!("Tickets ({}):", tickets.len()));
    for ticket in &tickets {
        formatter.line(&format!(
            "#{:<5} [{}] {}",
            ticket.id, ticket.status, ticket.title
        ));
        formatter.detail(&format!(
            "by {} on {}",
            ticket.created_by.label(),
            ticket.created_at.format("%Y-%m-%d %H:%M")
        ));
    }
    Ok(())
}

/// Handle `ticket show <id>`
pub async fn handle_ticket_show(
    id: i64,
    config_path: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(config_path)?;
    let user = ctx.require_route(Route::TicketDetail(id)).await?;

    let ticket = ctx.tickets().get(id).await?;

    if formatter.is_json() {
        return formatter.json(&ticket);
    }

    render_ticket(&ticket, formatter);
    if permissions::can_edit_ticket(&user, &ticket) {
        formatter.detail("you can edit this ticket");
    }
    Ok(())
}

/// Handle `ticket new`
///
/// Prompts for missing fields; the title is validated locally before any
/// request. Admins never reach the service call: the route guard redirects
/// them to `/tickets` and the handler reports that.
pub async fn handle_ticket_new(
    title: Option<String>,
    description: Option<String>,
    config_path: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(config_path)?;
    ctx.require_route(Route::TicketNew).await?;

    let theme = ColorfulTheme::default();
    let title = match title {
        Some(value) => value,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Title")
            .interact_text()?,
    };
    validation::validate_title(&title)?;

    let description = match description {
        Some(value) => value,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Description")
            .allow_empty(true)
            .interact_text()?,
    };

    let draft = TicketDraftBuilder::new()
        .title(title)
        .description(description)
        .build();

    let ticket = ctx.tickets().create(&draft).await?;

    formatter.success(&format!("Created ticket #{} '{}'", ticket.id, ticket.title));
    if formatter.is_json() {
        formatter.json(&ticket)?;
    }
    Ok(())
}

/// Handle `ticket edit <id>`
pub async fn handle_ticket_edit(
    id: i64,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    assign: Option<i64>,
    config_path: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let status = match status {
        Some(raw) => Some(TicketStatus::parse(&raw).ok_or_else(|| {
            DeskError::InvalidInput(format!(
                "Invalid status: '{raw}'. Must be one of: open, in_progress, closed"
            ))
        })?),
        None => None,
    };

    let patch = TicketPatch {
        title,
        description,
        status,
        assigned_to: assign,
    };
    if patch.is_empty() {
        return Err(DeskError::InvalidInput(
            "Nothing to change; pass at least one of --title, --description, --status, --assign"
                .to_string(),
        ));
    }

    let ctx = HandlerContext::new(config_path)?;
    let user = ctx.require_route(Route::TicketDetail(id)).await?;

    let service = ctx.tickets();
    let ticket = service.get(id).await?;

    // Pre-empt a request the server would refuse or silently truncate.
    if !permissions::can_apply_patch(&user, &ticket, &patch) {
        return Err(DeskError::custom(format!(
            "You cannot make this change to ticket #{id}: plain users may only edit \
             the description of their own open tickets"
        )));
    }

    let updated = service.update(id, &patch).await?;

    formatter.success(&format!("Updated ticket #{}", updated.id));
    if formatter.is_json() {
        formatter.json(&updated)?;
    }
    Ok(())
}

/// Handle `ticket comment <id> <content>`
pub async fn handle_ticket_comment(
    id: i64,
    content: String,
    config_path: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    validation::validate_comment(&content)?;

    let ctx = HandlerContext::new(config_path)?;
    ctx.require_route(Route::TicketDetail(id)).await?;

    let comment = ctx.tickets().add_comment(id, content.trim()).await?;

    formatter.success(&format!("Added comment #{} to ticket #{id}", comment.id));
    if formatter.is_json() {
        formatter.json(&comment)?;
    }
    Ok(())
}

/// Handle `ticket delete <id>`
pub async fn handle_ticket_delete(
    id: i64,
    force: bool,
    config_path: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(config_path)?;
    ctx.require_route(Route::TicketDetail(id)).await?;

    if !force {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete ticket #{id}?"))
            .default(false)
            .interact()?;
        if !confirmed {
            formatter.info("Cancelled");
            return Ok(());
        }
    }

    ctx.tickets().delete(id).await?;

    formatter.success(&format!("Deleted ticket #{id}"));
    if formatter.is_json() {
        formatter.json(&serde_json::json!({ "status": "success", "deleted": id }))?;
    }
    Ok(())
}

/// Render one ticket with its comments
pub fn render_ticket(ticket: &Ticket, formatter: &OutputFormatter) {
    formatter.line(&format!("#{} {}", ticket.id, ticket.title));
    formatter.line(&format!("Status:      {}", ticket.status));
    formatter.line(&format!("Created by:  {}", ticket.created_by.label()));
    if let Some(assigned) = &ticket.assigned_to {
        formatter.line(&format!("Assigned to: {}", assigned.label()));
    }
    formatter.line(&format!(
        "Created:     {}",
        ticket.created_at.format("%Y-%m-%d %H:%M")
    ));
    formatter.line(&format!(
        "Updated:     {}",
        ticket.updated_at.format("%Y-%m-%d %H:%M")
    ));
    if !ticket.description.is_empty() {
        formatter.line("");
        formatter.line(&ticket.description);
    }

    if let Some(comments) = &ticket.comments {
        if !comments.is_empty() {
            formatter.line("");
            formatter.line(&format!("Comments ({}):", comments.len()));
            for comment in comments {
                formatter.line(&format!(
                    "  {} ({}):",
                    comment.author.label(),
                    comment.created_at.format("%Y-%m-%d %H:%M")
                ));
                formatter.line(&format!("    {}", comment.content));
            }
        }
    }
}
