//! Support ticket model.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use serde_json::Value;
use uuid::Uuid;

use super::Document;
use crate::schema::support_tickets;
use crate::types::HasOwner;

/// Status assigned to tickets created without one.
pub const DEFAULT_TICKET_STATUS: &str = "open";

/// Support request raised by a user.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = support_tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SupportTicket {
    /// Unique ticket identifier.
    pub id: Uuid,
    /// Owner email, never empty.
    pub email: String,
    /// Free-form workflow status.
    pub status: String,
    /// Opaque ticket fields, always a JSON object.
    pub content: Value,
    /// Timestamp when the ticket was opened.
    pub created_at: Timestamp,
    /// Timestamp when the ticket was last updated.
    pub updated_at: Timestamp,
}

impl HasOwner for SupportTicket {
    fn owner_email(&self) -> &str {
        &self.email
    }
}

/// Data for opening a new ticket.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = support_tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewSupportTicket {
    /// Identifier assigned on construction.
    pub id: Uuid,
    /// Owner email.
    pub email: String,
    /// Initial status.
    pub status: String,
    /// Ticket fields.
    pub content: Value,
}

impl NewSupportTicket {
    /// Creates an open ticket owned by `email`.
    pub fn new(email: impl Into<String>, content: Document) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: email.into(),
            status: DEFAULT_TICKET_STATUS.to_owned(),
            content: Value::Object(content),
        }
    }

    /// Overrides the initial status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// Changes applied to an existing ticket.
///
/// Content keys are merged into the stored content, last write wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketChanges {
    /// New status, if any.
    pub status: Option<String>,
    /// Content keys to overwrite.
    pub content: Document,
}
