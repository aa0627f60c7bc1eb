//! Typed services over the remote API
//!
//! Thin CRUD wrappers: each call maps one endpoint, propagates the mapped
//! remote error, and performs no validation of its own. Handlers validate
//! input before calling and the server remains the authority on access.

mod tickets;
mod users;

pub use tickets::TicketService;
pub use users::UserService;
