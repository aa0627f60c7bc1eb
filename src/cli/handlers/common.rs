//! Shared handler context
//!
//! Wires configuration, the session store, the API client, and the auth
//! gateway together once so individual handlers stay small. Every data
//! command resolves its target route through the guard before touching a
//! service, so a request the server would refuse is never issued.

use crate::api::ApiClient;
use crate::auth::{ApiAuthGateway, AuthContext, AuthState};
use crate::config::Config;
use crate::core::User;
use crate::error::{DeskError, Result};
use crate::routes::{self, Navigation, Route};
use crate::services::{TicketService, UserService};
use crate::session::{FileSessionStore, SessionStore};
use std::path::Path;
use std::sync::Arc;

/// Common context for all handler operations
pub struct HandlerContext {
    pub config: Config,
    session: Arc<dyn SessionStore>,
    api: ApiClient,
}

impl HandlerContext {
    /// Create a new handler context from configuration
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::default_location()?);
        let api = ApiClient::new(&config, Arc::clone(&session))?;

        Ok(Self {
            config,
            session,
            api,
        })
    }

    /// Build an auth context over the real gateway
    #[must_use]
    pub fn auth_context(&self) -> AuthContext {
        let gateway = Arc::new(ApiAuthGateway::new(
            self.api.clone(),
            Arc::clone(&self.session),
        ));
        AuthContext::new(gateway, Arc::clone(&self.session))
    }

    /// Ticket service over the shared API client
    #[must_use]
    pub fn tickets(&self) -> TicketService {
        TicketService::new(self.api.clone())
    }

    /// User service over the shared API client
    #[must_use]
    pub fn users(&self) -> UserService {
        UserService::new(self.api.clone())
    }

    /// Resolve the startup auth state and require access to a route
    ///
    /// Returns the authenticated user when the guard allows the target.
    /// A redirect to `/login` becomes [`DeskError::NotLoggedIn`]; any other
    /// redirect becomes a role error naming where the guard sent us.
    pub async fn require_route(&self, target: Route) -> Result<User> {
        let mut auth = self.auth_context();
        let state = auth.initialize().await?.clone();
        require_route_with_state(target, &state)
    }
}

/// Guard a route against an already-resolved auth state
pub fn require_route_with_state(target: Route, state: &AuthState) -> Result<User> {
    match routes::resolve(target, state) {
        Navigation::View { route, .. } if route == target => state
            .user()
            .cloned()
            .ok_or_else(|| DeskError::custom("guard allowed a protected route while anonymous")),
        Navigation::View {
            route: Route::Login,
            ..
        } => Err(DeskError::NotLoggedIn),
        Navigation::View { route, .. } => {
            let role = state
                .user()
                .map_or_else(|| "anonymous".to_string(), |u| u.role.to_string());
            Err(DeskError::custom(format!(
                "{target} is not available for role '{role}'; you were redirected to {route}"
            )))
        },
        // initialize() never leaves the state Unknown
        Navigation::Pending => Err(DeskError::custom("auth state unresolved")),
    }
}

/// Common input validation for handler prompts and flags
pub mod validation {
    use crate::error::{DeskError, Result};

    /// Validate a ticket title
    pub fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(DeskError::InvalidInput(
                "Ticket title cannot be empty".to_string(),
            ));
        }
        if title.len() > 200 {
            return Err(DeskError::InvalidInput(
                "Ticket title cannot exceed 200 characters".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate a comment body
    pub fn validate_comment(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(DeskError::InvalidInput(
                "Comment cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;

    fn authed(role: Role) -> AuthState {
        AuthState::Authenticated(User {
            id: 1,
            username: "u".to_string(),
            email: "u@example.com".to_string(),
            role,
        })
    }

    #[test]
    fn test_anonymous_protected_route_is_not_logged_in() {
        let err = require_route_with_state(Route::Tickets, &AuthState::Anonymous).unwrap_err();
        assert!(matches!(err, DeskError::NotLoggedIn));
    }

    #[test]
    fn test_admin_blocked_from_ticket_new_names_redirect() {
        let err = require_route_with_state(Route::TicketNew, &authed(Role::Admin)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("/tickets/new"));
        assert!(message.contains("admin"));
    }

    #[test]
    fn test_allowed_route_returns_user() {
        let user = require_route_with_state(Route::Users, &authed(Role::Admin)).unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_title_validation() {
        use validation::validate_title;

        assert!(validate_title("Valid title").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());

        let long_title = "a".repeat(201);
        assert!(validate_title(&long_title).is_err());
    }
}
