//! Routes and navigation guards
//!
//! The client's navigable views form a small route space. Access is decided
//! by [`decide`], a pure function of the target route and the current
//! [`AuthState`]; [`resolve`] folds it into the terminal route for a
//! navigation. A navigation is guarded exactly once, so there is nothing to
//! loop: no reload tricks, no self-expiring flags.

use crate::auth::AuthState;
use crate::core::{Role, permissions};
use std::fmt;

/// A navigable view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/` — never renders, always redirects by role
    Root,
    /// `/login` — public-only
    Login,
    /// `/register` — public-only
    Register,
    /// `/tickets` — any authenticated user
    Tickets,
    /// `/tickets/:id` — any authenticated user
    TicketDetail(i64),
    /// `/tickets/new` — `user` and `manager` only
    TicketNew,
    /// `/users` — `admin` only
    Users,
}

impl Route {
    /// Parse a path into a route; unknown paths fall through to `/`
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_start_matches('/').trim_end_matches('/');
        match trimmed {
            "" => Self::Root,
            "login" => Self::Login,
            "register" => Self::Register,
            "tickets" => Self::Tickets,
            "tickets/new" => Self::TicketNew,
            "users" => Self::Users,
            other => {
                if let Some(id) = other.strip_prefix("tickets/").and_then(parse_ticket_id) {
                    Self::TicketDetail(id)
                } else {
                    // Catch-all: anything unrecognized goes home
                    Self::Root
                }
            },
        }
    }

    /// The canonical path for this route
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Tickets => "/tickets".to_string(),
            Self::TicketDetail(id) => format!("/tickets/{id}"),
            Self::TicketNew => "/tickets/new".to_string(),
            Self::Users => "/users".to_string(),
        }
    }
}

/// Parse a ticket id path segment; only bare decimal digits qualify, so
/// signed forms like `-5` or `+5` fall through to the catch-all
fn parse_ticket_id(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Outcome of guarding a single route against the current auth state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Auth state is still `Unknown`; hold rendering, no decision yet
    Pending,
    /// Render the route
    Allow,
    /// Go elsewhere instead
    Redirect(Route),
}

/// The landing route for a freshly authenticated user
#[must_use]
pub const fn role_home(role: Role) -> Route {
    match role {
        Role::Admin => Route::Users,
        Role::User | Role::Manager => Route::Tickets,
    }
}

/// Guard a route against the current auth state
///
/// Pure and idempotent: evaluating it any number of times for the same
/// inputs yields the same decision.
#[must_use]
pub fn decide(route: Route, state: &AuthState) -> RouteDecision {
    let user = match state {
        AuthState::Unknown => return RouteDecision::Pending,
        AuthState::Anonymous => None,
        AuthState::Authenticated(user) => Some(user),
    };

    match (route, user) {
        // Root always redirects by role, or to login
        (Route::Root, Some(user)) => RouteDecision::Redirect(role_home(user.role)),
        (Route::Root, None) => RouteDecision::Redirect(Route::Login),

        // Public-only routes bounce authenticated users home
        (Route::Login | Route::Register, Some(user)) => {
            RouteDecision::Redirect(role_home(user.role))
        },
        (Route::Login | Route::Register, None) => RouteDecision::Allow,

        // Everything else requires authentication
        (_, None) => RouteDecision::Redirect(Route::Login),

        // Role-restricted routes
        (Route::TicketNew, Some(user)) => {
            if permissions::can_create_tickets(user.role) {
                RouteDecision::Allow
            } else {
                RouteDecision::Redirect(Route::Tickets)
            }
        },
        (Route::Users, Some(user)) => {
            if permissions::can_list_users(user.role) {
                RouteDecision::Allow
            } else {
                RouteDecision::Redirect(Route::Tickets)
            }
        },

        (Route::Tickets | Route::TicketDetail(_), Some(_)) => RouteDecision::Allow,
    }
}

/// Result of resolving a navigation to its terminal route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Auth state is not settled yet
    Pending,
    /// Render this route; `redirected_from` is set when the guard moved us
    View {
        route: Route,
        redirected_from: Option<Route>,
    },
}

/// Maximum redirect hops in any reachable chain
///
/// The longest chain is `/` -> role home, or a public-only route ->
/// role home; both settle in one hop, so two is already generous.
const MAX_REDIRECTS: usize = 3;

/// Resolve a navigation by following guard redirects to a terminal `Allow`
///
/// Evaluated once per navigation. Redirect targets are themselves guarded,
/// so the final route is always one the state is entitled to render.
#[must_use]
pub fn resolve(target: Route, state: &AuthState) -> Navigation {
    let mut route = target;
    for _ in 0..=MAX_REDIRECTS {
        match decide(route, state) {
            RouteDecision::Pending => return Navigation::Pending,
            RouteDecision::Allow => {
                return Navigation::View {
                    route,
                    redirected_from: (route != target).then_some(target),
                };
            },
            RouteDecision::Redirect(next) => route = next,
        }
    }
    // Unreachable for the route space above; tests enumerate every pair.
    unreachable!("guard redirect chain exceeded {MAX_REDIRECTS} hops");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::User;

    fn authed(role: Role) -> AuthState {
        AuthState::Authenticated(User {
            id: 1,
            username: "someone".to_string(),
            email: "someone@example.com".to_string(),
            role,
        })
    }

    fn all_routes() -> Vec<Route> {
        vec![
            Route::Root,
            Route::Login,
            Route::Register,
            Route::Tickets,
            Route::TicketDetail(7),
            Route::TicketNew,
            Route::Users,
        ]
    }

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Root);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/tickets/"), Route::Tickets);
        assert_eq!(Route::parse("tickets/42"), Route::TicketDetail(42));
        assert_eq!(Route::parse("/tickets/new"), Route::TicketNew);
        assert_eq!(Route::parse("/users"), Route::Users);
    }

    #[test]
    fn test_parse_unknown_paths_fall_through_to_root() {
        assert_eq!(Route::parse("/settings"), Route::Root);
        assert_eq!(Route::parse("/tickets/abc"), Route::Root);
        assert_eq!(Route::parse("/tickets/1/comments"), Route::Root);
    }

    #[test]
    fn test_parse_rejects_signed_ticket_ids() {
        assert_eq!(Route::parse("/tickets/-5"), Route::Root);
        assert_eq!(Route::parse("/tickets/+5"), Route::Root);
        assert_eq!(Route::parse("/tickets/0"), Route::TicketDetail(0));
    }

    #[test]
    fn test_unknown_state_is_always_pending() {
        for route in all_routes() {
            assert_eq!(decide(route, &AuthState::Unknown), RouteDecision::Pending);
        }
    }

    #[test]
    fn test_anonymous_protected_routes_redirect_to_login() {
        for route in [
            Route::Tickets,
            Route::TicketDetail(1),
            Route::TicketNew,
            Route::Users,
        ] {
            assert_eq!(
                decide(route, &AuthState::Anonymous),
                RouteDecision::Redirect(Route::Login),
                "{route} should send anonymous visitors to login"
            );
        }
    }

    #[test]
    fn test_anonymous_root_redirects_to_login() {
        assert_eq!(
            decide(Route::Root, &AuthState::Anonymous),
            RouteDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_authenticated_public_only_redirects_by_role() {
        for route in [Route::Login, Route::Register] {
            assert_eq!(
                decide(route, &authed(Role::Admin)),
                RouteDecision::Redirect(Route::Users)
            );
            assert_eq!(
                decide(route, &authed(Role::User)),
                RouteDecision::Redirect(Route::Tickets)
            );
            assert_eq!(
                decide(route, &authed(Role::Manager)),
                RouteDecision::Redirect(Route::Tickets)
            );
        }
    }

    #[test]
    fn test_admin_cannot_reach_ticket_new() {
        assert_eq!(
            decide(Route::TicketNew, &authed(Role::Admin)),
            RouteDecision::Redirect(Route::Tickets)
        );
        assert_eq!(decide(Route::TicketNew, &authed(Role::User)), RouteDecision::Allow);
        assert_eq!(
            decide(Route::TicketNew, &authed(Role::Manager)),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_users_route_is_admin_only() {
        assert_eq!(decide(Route::Users, &authed(Role::Admin)), RouteDecision::Allow);
        assert_eq!(
            decide(Route::Users, &authed(Role::User)),
            RouteDecision::Redirect(Route::Tickets)
        );
        assert_eq!(
            decide(Route::Users, &authed(Role::Manager)),
            RouteDecision::Redirect(Route::Tickets)
        );
    }

    #[test]
    fn test_role_home() {
        assert_eq!(role_home(Role::Admin), Route::Users);
        assert_eq!(role_home(Role::Manager), Route::Tickets);
        assert_eq!(role_home(Role::User), Route::Tickets);
    }

    #[test]
    fn test_resolve_terminates_for_every_route_and_state() {
        let states = [
            AuthState::Anonymous,
            authed(Role::User),
            authed(Role::Manager),
            authed(Role::Admin),
        ];
        for state in &states {
            for route in all_routes() {
                // Must not panic and must land on an allowed route.
                match resolve(route, state) {
                    Navigation::View { route: landed, .. } => {
                        assert_eq!(
                            decide(landed, state),
                            RouteDecision::Allow,
                            "resolution of {route} must land on an allowed route"
                        );
                    },
                    Navigation::Pending => panic!("settled state resolved to pending"),
                }
            }
        }
    }

    #[test]
    fn test_resolve_reports_redirect_origin() {
        let nav = resolve(Route::Root, &AuthState::Anonymous);
        assert_eq!(
            nav,
            Navigation::View {
                route: Route::Login,
                redirected_from: Some(Route::Root),
            }
        );

        let nav = resolve(Route::Tickets, &authed(Role::User));
        assert_eq!(
            nav,
            Navigation::View {
                route: Route::Tickets,
                redirected_from: None,
            }
        );
    }

    #[test]
    fn test_resolve_pending_while_unknown() {
        assert_eq!(resolve(Route::Tickets, &AuthState::Unknown), Navigation::Pending);
    }
}
