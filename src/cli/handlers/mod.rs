//! Command handlers
//!
//! Each handler owns one command end to end: input validation, route
//! guarding, the service call, and rendering.

mod auth;
mod common;
mod open;
mod tickets;
mod users;

pub use auth::{handle_login, handle_logout, handle_register, handle_whoami};
pub use common::{HandlerContext, require_route_with_state};
pub use open::handle_open;
pub use tickets::{
    handle_ticket_comment, handle_ticket_delete, handle_ticket_edit, handle_ticket_list,
    handle_ticket_new, handle_ticket_show,
};
pub use users::handle_user_list;
