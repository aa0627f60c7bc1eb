//! deskctl - command-line client for the helpdesk ticket API
//!
//! This is the main entry point. It parses command-line arguments and
//! dispatches to the appropriate command handler; every handler is
//! responsible for its own guarding, service calls, and rendering.

use clap::Parser;
use deskctl::cli::{Cli, Commands, OutputFormatter, TicketCommands, UserCommands, handlers};
use deskctl::error::{DeskError, Result};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configure output formatter based on flags
    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    }

    if let Err(e) = run(cli, &formatter).await {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

async fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    let config = cli.config;
    match cli.command {
        Commands::Login { username, password } => {
            handlers::handle_login(username, password, config.as_deref(), formatter).await
        },
        Commands::Register {
            username,
            email,
            password,
            confirm,
        } => {
            handlers::handle_register(
                username,
                email,
                password,
                confirm,
                config.as_deref(),
                formatter,
            )
            .await
        },
        Commands::Logout => handlers::handle_logout(config.as_deref(), formatter),
        Commands::Whoami => handlers::handle_whoami(config.as_deref(), formatter).await,
        Commands::Open { path } => handlers::handle_open(&path, config.as_deref(), formatter).await,
        Commands::Ticket { command } => dispatch_ticket_command(command, config, formatter).await,
        Commands::User { command } => dispatch_user_command(command, config, formatter).await,
    }
}

async fn dispatch_ticket_command(
    command: TicketCommands,
    config: Option<PathBuf>,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        TicketCommands::List => handlers::handle_ticket_list(config.as_deref(), formatter).await,
        TicketCommands::Show { id } => {
            handlers::handle_ticket_show(id, config.as_deref(), formatter).await
        },
        TicketCommands::New { title, description } => {
            handlers::handle_ticket_new(title, description, config.as_deref(), formatter).await
        },
        TicketCommands::Edit {
            id,
            title,
            description,
            status,
            assign,
        } => {
            handlers::handle_ticket_edit(
                id,
                title,
                description,
                status,
                assign,
                config.as_deref(),
                formatter,
            )
            .await
        },
        TicketCommands::Comment { id, content } => {
            handlers::handle_ticket_comment(id, content, config.as_deref(), formatter).await
        },
        TicketCommands::Delete { id, force } => {
            handlers::handle_ticket_delete(id, force, config.as_deref(), formatter).await
        },
    }
}

async fn dispatch_user_command(
    command: UserCommands,
    config: Option<PathBuf>,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        UserCommands::List { search } => {
            handlers::handle_user_list(search, config.as_deref(), formatter).await
        },
    }
}

/// Handle errors and display them to the user
///
/// Shows the main message, any suggestions for fixing it, and a JSON
/// rendering when `--json` was requested.
fn handle_error(error: &DeskError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        formatter.info("\nSuggestions:");
        for suggestion in &suggestions {
            formatter.info(&format!("  • {suggestion}"));
        }
    }

    if formatter.is_json() {
        let _ = formatter.json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
        }));
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let _cli = Cli::parse_from(["deskctl", "whoami"]);
        let _cli = Cli::parse_from(["deskctl", "ticket", "list"]);
        let _cli = Cli::parse_from(["deskctl", "open", "/tickets/3"]);
        let _cli = Cli::parse_from(["deskctl", "login", "--username", "alice"]);
    }
}
