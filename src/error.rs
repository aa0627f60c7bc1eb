//! Error types for deskctl
//!
//! All fallible operations in the crate return [`Result`], an alias over
//! [`DeskError`]. Remote failures are mapped into typed variants by the API
//! layer so that handlers can surface a single user-visible message without
//! inspecting HTTP details.

use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, DeskError>;

/// Errors that can occur while talking to the ticket API or running commands
#[derive(Debug, Error)]
pub enum DeskError {
    /// The server rejected the supplied credentials or token
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// The server returned field-level validation errors (registration
    /// conflicts and similar). Keys are field names, values the messages.
    #[error("Validation failed")]
    Validation { fields: BTreeMap<String, String> },

    /// The server could not be reached or the request did not complete
    #[error("Network error: {message}")]
    Network { message: String },

    /// The requested resource does not exist
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Any other non-success response from the server
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A command was refused locally before any request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The command requires an authenticated session and none exists
    #[error("Not logged in")]
    NotLoggedIn,

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O failure (session file, config file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Interactive prompt failed (terminal closed, not a tty)
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Catch-all for internal invariant violations
    #[error("{0}")]
    Custom(String),
}

impl DeskError {
    /// Create a custom error from any displayable value
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Returns a user-friendly message for display
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth { message } => message.clone(),
            Self::Validation { fields } => {
                if fields.is_empty() {
                    "Validation failed".to_string()
                } else {
                    fields
                        .iter()
                        .map(|(field, msg)| format!("{field}: {msg}"))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            },
            Self::Network { message } => format!("Could not reach the server: {message}"),
            Self::NotFound { resource } => format!("{resource} was not found"),
            Self::NotLoggedIn => "You are not logged in".to_string(),
            _ => self.to_string(),
        }
    }

    /// Returns suggestions for resolving the error, if any
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Auth { .. } => vec![
                "Check your username and password".to_string(),
                "Run 'deskctl login' to start a new session".to_string(),
            ],
            Self::NotLoggedIn => vec![
                "Run 'deskctl login' to authenticate".to_string(),
                "Run 'deskctl register' to create an account".to_string(),
            ],
            Self::Network { .. } => vec![
                "Check that the server is running and reachable".to_string(),
                "Verify 'api.base_url' in your configuration".to_string(),
            ],
            Self::Config(_) => {
                vec!["Check your configuration file for invalid values".to_string()]
            },
            _ => Vec::new(),
        }
    }

    /// Whether retrying the same command could succeed without other changes
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Api { .. })
    }

    /// Whether the error originates from configuration
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("username".to_string(), "already exists".to_string());
        fields.insert("email".to_string(), "already in use".to_string());

        let err = DeskError::Validation { fields };
        let message = err.user_message();
        assert!(message.contains("username: already exists"));
        assert!(message.contains("email: already in use"));
    }

    #[test]
    fn test_auth_error_suggestions() {
        let err = DeskError::Auth {
            message: "Invalid credentials".to_string(),
        };
        assert!(!err.suggestions().is_empty());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_network_error_is_recoverable() {
        let err = DeskError::Network {
            message: "connection refused".to_string(),
        };
        assert!(err.is_recoverable());
    }
}
