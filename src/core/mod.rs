//! Core domain types for deskctl
//!
//! These types mirror the resources owned by the remote ticket API. The
//! client never mutates them locally; it only displays what the server
//! returns and submits drafts/patches back.

mod builders;
pub mod permissions;
mod ticket;
mod user;

pub use builders::TicketDraftBuilder;
pub use ticket::{Comment, Ticket, TicketDraft, TicketPatch, TicketStatus};
pub use user::{Role, User, UserRef};
