use super::user::UserRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

impl TicketStatus {
    /// Parse a status from user input
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "in_progress" | "in-progress" => Some(Self::InProgress),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// A support ticket as returned by the remote API
///
/// List endpoints omit `comments`; the detail endpoint includes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub created_by: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
}

/// A comment attached to a ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author: UserRef,
    /// Omitted when the comment is nested inside a ticket detail response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new ticket
///
/// The server sets the author, status, and timestamps.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
}

/// Partial update sent to the ticket detail endpoint
///
/// Only present fields are submitted. The server enforces which fields a
/// given role may change; see [`super::permissions`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
}

impl TicketPatch {
    /// Whether the patch carries no changes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assigned_to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(TicketStatus::parse("open"), Some(TicketStatus::Open));
        assert_eq!(
            TicketStatus::parse("In-Progress"),
            Some(TicketStatus::InProgress)
        );
        assert_eq!(TicketStatus::parse("closed"), Some(TicketStatus::Closed));
        assert_eq!(TicketStatus::parse("done"), None);
    }

    #[test]
    fn test_ticket_deserializes_without_comments() {
        let json = r#"{
            "id": 1,
            "title": "Printer on fire",
            "description": "It is on fire",
            "status": "open",
            "created_by": 3,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.created_by.id(), 3);
        assert!(ticket.comments.is_none());
        assert!(ticket.assigned_to.is_none());
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = TicketPatch {
            description: Some("updated".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"description": "updated"}));
        assert!(!patch.is_empty());
        assert!(TicketPatch::default().is_empty());
    }
}
