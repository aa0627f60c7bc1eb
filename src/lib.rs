//! deskctl - command-line client for the helpdesk ticket API
//!
//! This crate is a thin presentation layer over a remote REST API: users
//! authenticate, view and create support tickets, and administrators list
//! accounts. All authority lives server-side; the client mirrors the access
//! rules only to decide what to render and where to send the user.
//!
//! The moving parts, leaf first:
//! - [`session`]: the persisted token (the only state the client keeps)
//! - [`api`]: HTTP plumbing with token injection and typed error mapping
//! - [`auth`]: the gateway to the remote auth endpoints and the
//!   `unknown -> authenticated | anonymous` state machine
//! - [`routes`]: pure navigation guards, evaluated once per navigation
//! - [`services`]: typed CRUD over tickets and users
//! - [`cli`]: commands and rendering

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod routes;
pub mod services;
pub mod session;

// Re-export commonly used types
pub use error::{DeskError, Result};
