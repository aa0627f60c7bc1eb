use super::{TicketDraft, TicketPatch, TicketStatus};

/// Builder for creating [`TicketDraft`] instances
#[derive(Default)]
pub struct TicketDraftBuilder {
    title: Option<String>,
    description: Option<String>,
}

impl TicketDraftBuilder {
    /// Create a new draft builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build the draft
    pub fn build(self) -> TicketDraft {
        TicketDraft {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        }
    }
}

impl TicketPatch {
    /// Patch changing only the description
    #[must_use]
    pub fn description_only(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Patch changing only the status
    #[must_use]
    pub fn status_only(status: TicketStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_builder() {
        let draft = TicketDraftBuilder::new()
            .title("Broken login")
            .description("500 on submit")
            .build();

        assert_eq!(draft.title, "Broken login");
        assert_eq!(draft.description, "500 on submit");
    }

    #[test]
    fn test_description_only_patch() {
        let patch = TicketPatch::description_only("new text");
        assert_eq!(patch.description.as_deref(), Some("new text"));
        assert!(patch.title.is_none());
        assert!(patch.status.is_none());
    }
}
