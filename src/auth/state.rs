//! Authentication state machine
//!
//! [`AuthContext`] is an explicit, injected state object: handlers and
//! route guards receive it rather than consulting any global. Its state
//! moves `Unknown -> Authenticated | Anonymous` during [`AuthContext::initialize`]
//! and thereafter only through `login`, `register`, and `logout`.
//!
//! Every state-changing operation takes `&mut self`, so two authentication
//! attempts cannot overlap within one process.

use super::{AuthGateway, LoginCredentials, RegisterData};
use crate::core::User;
use crate::error::{DeskError, Result};
use crate::session::SessionStore;
use std::sync::Arc;
use tracing::debug;

/// Authentication state derived from the session and the remote API
///
/// Invariant: `Authenticated` holds exactly when a user is known and a
/// token is stored; neither exists in `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// A persisted token exists but has not been verified yet
    Unknown,
    /// No valid session
    Anonymous,
    /// Verified session for the given user
    Authenticated(User),
}

impl AuthState {
    /// Whether a verified session exists
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The authenticated user, if any
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Holds the current [`AuthState`] and drives transitions through a gateway
pub struct AuthContext {
    gateway: Arc<dyn AuthGateway>,
    session: Arc<dyn SessionStore>,
    state: AuthState,
}

impl AuthContext {
    /// Create a context in the `Unknown` state
    #[must_use]
    pub fn new(gateway: Arc<dyn AuthGateway>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            gateway,
            session,
            state: AuthState::Unknown,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &AuthState {
        &self.state
    }

    /// Resolve the startup state from the persisted session
    ///
    /// With no persisted token the state is immediately `Anonymous`. With a
    /// token, the user is fetched; on `None` (rejected token or unreachable
    /// server) the token is cleared and the state becomes `Anonymous`.
    pub async fn initialize(&mut self) -> Result<&AuthState> {
        if self.session.get()?.is_none() {
            self.state = AuthState::Anonymous;
            return Ok(&self.state);
        }

        self.state = AuthState::Unknown;
        match self.gateway.current_user().await? {
            Some(user) => {
                debug!(username = %user.username, role = %user.role, "session verified");
                self.state = AuthState::Authenticated(user);
            },
            None => {
                self.session.clear()?;
                self.state = AuthState::Anonymous;
            },
        }
        Ok(&self.state)
    }

    /// Authenticate with username and password
    ///
    /// On failure the state is left unchanged and the error propagates for
    /// the caller to display.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let credentials = LoginCredentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.gateway.login(&credentials).await?;

        // The token endpoint does not return the profile; fetch it so the
        // state carries the user's id and role.
        match self.gateway.current_user().await? {
            Some(user) => {
                self.state = AuthState::Authenticated(user.clone());
                Ok(user)
            },
            None => Err(DeskError::Auth {
                message: "login succeeded but the profile could not be fetched".to_string(),
            }),
        }
    }

    /// Create an account; on success the user is already authenticated
    pub async fn register(&mut self, username: &str, email: &str, password: &str) -> Result<User> {
        let data = RegisterData {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let (user, _token) = self.gateway.register(&data).await?;
        self.state = AuthState::Authenticated(user.clone());
        Ok(user)
    }

    /// Drop the session and transition to `Anonymous`
    pub fn logout(&mut self) -> Result<()> {
        self.gateway.logout()?;
        self.state = AuthState::Anonymous;
        Ok(())
    }
}
