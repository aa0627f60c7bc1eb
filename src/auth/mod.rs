//! Authentication gateway
//!
//! Wraps the remote login/register/logout/current-user endpoints and owns
//! the token lifecycle: every successful login or registration stores the
//! token in the session before returning, so any request issued afterwards
//! already carries it. A rejected token is cleared as a side effect of
//! [`AuthGateway::current_user`].

pub mod state;

pub use state::{AuthContext, AuthState};

use crate::api::ApiClient;
use crate::core::User;
use crate::error::{DeskError, Result};
use crate::session::SessionStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Credentials submitted to the token endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Payload submitted to the registration endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    user: User,
    token: String,
}

/// Remote authentication operations
///
/// Seam for substituting a test double for the real API-backed gateway.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a token; stores it in the session
    async fn login(&self, credentials: &LoginCredentials) -> Result<String>;

    /// Create an account; the returned token is already stored, so the new
    /// user is authenticated without a separate login step
    async fn register(&self, data: &RegisterData) -> Result<(User, String)>;

    /// Fetch the user behind the stored token
    ///
    /// Returns `Ok(None)` when no token is present or the server rejects
    /// it; rejection also clears the session. Network and other failures
    /// resolve to `None` as well so callers fall back to anonymous.
    async fn current_user(&self) -> Result<Option<User>>;

    /// Drop the session; never requires a remote call
    fn logout(&self) -> Result<()>;
}

/// Gateway backed by the remote ticket API
pub struct ApiAuthGateway {
    api: ApiClient,
    session: Arc<dyn SessionStore>,
}

impl ApiAuthGateway {
    /// Create a gateway over the given client and session store
    #[must_use]
    pub fn new(api: ApiClient, session: Arc<dyn SessionStore>) -> Self {
        Self { api, session }
    }
}

#[async_trait]
impl AuthGateway for ApiAuthGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<String> {
        let response: TokenResponse =
            self.api
                .post("token/", credentials)
                .await
                .map_err(|e| match e {
                    // The token endpoint reports blank or wrong credentials
                    // as field errors; to the caller both are bad credentials.
                    DeskError::Validation { fields } => DeskError::Auth {
                        message: fields
                            .values()
                            .cloned()
                            .collect::<Vec<_>>()
                            .join("; "),
                    },
                    other => other,
                })?;

        self.session.set(&response.token)?;
        debug!("login succeeded, token stored");
        Ok(response.token)
    }

    async fn register(&self, data: &RegisterData) -> Result<(User, String)> {
        let response: RegisterResponse = self.api.post("register/", data).await?;
        self.session.set(&response.token)?;
        debug!(username = %response.user.username, "registration succeeded, token stored");
        Ok((response.user, response.token))
    }

    async fn current_user(&self) -> Result<Option<User>> {
        if self.session.get()?.is_none() {
            return Ok(None);
        }

        match self.api.get::<User>("users/me/").await {
            Ok(user) => Ok(Some(user)),
            Err(DeskError::Auth { message }) => {
                debug!(%message, "stored token rejected, clearing session");
                self.session.clear()?;
                Ok(None)
            },
            Err(e) => {
                debug!(error = %e, "current-user fetch failed, treating as anonymous");
                Ok(None)
            },
        }
    }

    fn logout(&self) -> Result<()> {
        self.session.clear()
    }
}
