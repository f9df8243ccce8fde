//! Support ticket request types.

use dealership_store::model::{Document, TicketChanges};
use serde::{Deserialize, Serialize};

/// Content keys that belong to the ticket record.
const RESERVED_CONTENT_KEYS: [&str; 3] = ["_id", "email", "status"];

/// Request payload for opening a support ticket.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicket {
    /// Owner of the ticket; defaults to the caller.
    #[serde(default)]
    pub email: Option<String>,
    /// Initial status; defaults to `open`.
    #[serde(default)]
    pub status: Option<String>,
    /// Free-form ticket content.
    #[serde(flatten)]
    pub content: Document,
}

/// Request payload for updating a support ticket.
///
/// The owner of a ticket never changes.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTicket {
    /// New status, if any.
    #[serde(default)]
    pub status: Option<String>,
    /// Content fields to merge.
    #[serde(flatten)]
    pub content: Document,
}

impl UpdateTicket {
    /// Converts the request into changes for the store.
    pub fn into_changes(self) -> TicketChanges {
        let mut content = self.content;
        for key in RESERVED_CONTENT_KEYS {
            content.remove(key);
        }

        TicketChanges {
            status: self.status,
            content,
        }
    }
}

/// Query parameters for listing support tickets.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketQuery {
    /// Owner to filter by; only honoured for administrators.
    pub email: Option<String>,
}
