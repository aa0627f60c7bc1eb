use crate::api::ApiClient;
use crate::core::{Comment, Ticket, TicketDraft, TicketPatch};
use crate::error::Result;
use serde::Serialize;

/// CRUD operations on the ticket collection
#[derive(Clone)]
pub struct TicketService {
    api: ApiClient,
}

#[derive(Serialize)]
struct CommentPayload<'a> {
    content: &'a str,
}

impl TicketService {
    /// Create a service over the given API client
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List tickets visible to the current user
    ///
    /// The server filters by role: plain users receive only their own
    /// tickets, managers and admins receive all.
    pub async fn list(&self) -> Result<Vec<Ticket>> {
        self.api.get("tickets/").await
    }

    /// Fetch one ticket with its comments
    pub async fn get(&self, id: i64) -> Result<Ticket> {
        self.api.get(&format!("tickets/{id}/")).await
    }

    /// Create a ticket; the server sets the author and initial status
    pub async fn create(&self, draft: &TicketDraft) -> Result<Ticket> {
        self.api.post("tickets/", draft).await
    }

    /// Apply a partial update to a ticket
    pub async fn update(&self, id: i64, patch: &TicketPatch) -> Result<Ticket> {
        self.api.put(&format!("tickets/{id}/"), patch).await
    }

    /// Delete a ticket
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.api.delete(&format!("tickets/{id}/")).await
    }

    /// Add a comment to a ticket; the server sets the author
    pub async fn add_comment(&self, ticket_id: i64, content: &str) -> Result<Comment> {
        self.api
            .post(&format!("tickets/{ticket_id}/comments/"), &CommentPayload { content })
            .await
    }
}
