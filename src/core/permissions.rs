//! Client-side mirror of the server's access rules
//!
//! The server is the authority on every rule here; these checks only shape
//! output and avoid requests the server would refuse. They must stay in sync
//! with the server's permission classes:
//! - `user` sees only tickets they created; `manager` and `admin` see all
//! - `user` may edit only their own ticket while it is open, and only the
//!   description; `manager` and `admin` edit any field of any ticket
//! - creating tickets is for `user` and `manager`; listing users is
//!   admin-only

use super::{Role, Ticket, TicketPatch, TicketStatus, User};

/// Roles allowed to create tickets
pub const TICKET_CREATOR_ROLES: [Role; 2] = [Role::User, Role::Manager];

/// Roles allowed to list and manage users
pub const USER_ADMIN_ROLES: [Role; 1] = [Role::Admin];

/// Whether the user sees every ticket or only their own
#[must_use]
pub const fn sees_all_tickets(role: Role) -> bool {
    matches!(role, Role::Manager | Role::Admin)
}

/// Whether the user may create new tickets
#[must_use]
pub fn can_create_tickets(role: Role) -> bool {
    TICKET_CREATOR_ROLES.contains(&role)
}

/// Whether the user may list user accounts
#[must_use]
pub fn can_list_users(role: Role) -> bool {
    USER_ADMIN_ROLES.contains(&role)
}

/// Whether the user may edit the given ticket at all
#[must_use]
pub fn can_edit_ticket(user: &User, ticket: &Ticket) -> bool {
    if sees_all_tickets(user.role) {
        return true;
    }
    ticket.created_by.id() == user.id && ticket.status == TicketStatus::Open
}

/// Whether the user may submit this particular patch to the ticket
///
/// Plain users are limited to the description field; the server would
/// silently drop anything else, so the client refuses up front.
#[must_use]
pub fn can_apply_patch(user: &User, ticket: &Ticket, patch: &TicketPatch) -> bool {
    if !can_edit_ticket(user, ticket) {
        return false;
    }
    if sees_all_tickets(user.role) {
        return true;
    }
    patch.title.is_none() && patch.status.is_none() && patch.assigned_to.is_none()
}

/// Filter a ticket listing down to what the user is entitled to see
///
/// The server already filters its responses; this is applied on top so a
/// misconfigured or older server never leaks foreign tickets into output.
#[must_use]
pub fn visible_tickets(user: &User, tickets: Vec<Ticket>) -> Vec<Ticket> {
    if sees_all_tickets(user.role) {
        return tickets;
    }
    tickets
        .into_iter()
        .filter(|ticket| ticket.created_by.id() == user.id)
        .collect()
}
