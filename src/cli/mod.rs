//! Command-line interface definitions
//!
//! The command tree mirrors the client's navigable views: authentication
//! commands, ticket views, and the admin user listing, plus `open` which
//! navigates an arbitrary path through the route guard.

pub mod handlers;
pub mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// deskctl - command-line client for the helpdesk ticket API
#[derive(Parser)]
#[command(name = "deskctl", version, about, long_about = None)]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to an alternative configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account; you are logged in on success
    Register {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Email address (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Password confirmation (prompted when omitted)
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Drop the stored session
    Logout,

    /// Show the currently authenticated user
    Whoami,

    /// Navigate to a path and render whatever the route guard allows
    Open {
        /// Target path, e.g. "/", "/tickets", "/tickets/3", "/users"
        path: String,
    },

    /// Work with tickets
    Ticket {
        #[command(subcommand)]
        command: TicketCommands,
    },

    /// Work with user accounts (administrators)
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

/// Ticket subcommands
#[derive(Subcommand)]
pub enum TicketCommands {
    /// List tickets visible to you
    List,

    /// Show one ticket with its comments
    Show {
        /// Ticket id
        id: i64,
    },

    /// Create a new ticket
    New {
        /// Title (prompted when omitted)
        #[arg(short, long)]
        title: Option<String>,

        /// Description (prompted when omitted)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Edit a ticket
    Edit {
        /// Ticket id
        id: i64,

        /// New title (managers and admins)
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New status: open, in_progress, closed (managers and admins)
        #[arg(long)]
        status: Option<String>,

        /// Assign to the given user id (managers and admins)
        #[arg(long, value_name = "USER_ID")]
        assign: Option<i64>,
    },

    /// Add a comment to a ticket
    Comment {
        /// Ticket id
        id: i64,

        /// Comment text
        content: String,
    },

    /// Delete a ticket
    Delete {
        /// Ticket id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// List user accounts
    List {
        /// Filter by username, email, or role
        #[arg(short, long)]
        search: Option<String>,
    },
}
