//! Stored records rendered as flat JSON documents.
//!
//! Every record exposes its free-form fields at the top level next to `_id`
//! and the columns the store tracks separately. Free-form fields that collide
//! with those columns are dropped.

use dealership_store::model::{self, Document};
use dealership_store::types::UserRole;
use jiff::Timestamp;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Keys owned by the record itself rather than its free-form fields.
const RESERVED_KEYS: [&str; 6] = ["_id", "email", "role", "status", "createdAt", "updatedAt"];

/// Takes the object out of a stored JSON column without its reserved keys.
fn into_fields(value: Value) -> Document {
    let Value::Object(mut fields) = value else {
        return Document::new();
    };

    for key in RESERVED_KEYS {
        fields.remove(key);
    }

    fields
}

/// A registered user.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Identifier of the user.
    #[serde(rename = "_id")]
    pub user_id: Uuid,
    /// Unique email of the user.
    pub email: String,
    /// Role deciding administrative access.
    pub role: UserRole,
    /// Profile fields.
    #[serde(flatten)]
    pub profile: Document,
    /// Timestamp when the user was registered.
    pub created_at: Timestamp,
    /// Timestamp when the user was last updated.
    pub updated_at: Timestamp,
}

impl From<model::User> for UserRecord {
    fn from(user: model::User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            role: user.role,
            profile: into_fields(user.profile),
            created_at: user.created_at.into(),
            updated_at: user.updated_at.into(),
        }
    }
}

/// A support ticket.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    /// Identifier of the ticket.
    #[serde(rename = "_id")]
    pub ticket_id: Uuid,
    /// Email of the ticket owner.
    pub email: String,
    /// Processing status.
    pub status: String,
    /// Free-form ticket content.
    #[serde(flatten)]
    pub content: Document,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<model::SupportTicket> for TicketRecord {
    fn from(ticket: model::SupportTicket) -> Self {
        Self {
            ticket_id: ticket.id,
            email: ticket.email,
            status: ticket.status,
            content: into_fields(ticket.content),
            created_at: ticket.created_at.into(),
            updated_at: ticket.updated_at.into(),
        }
    }
}

/// A category, product or shop item.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    #[serde(rename = "_id")]
    pub document_id: Uuid,
    #[serde(flatten)]
    pub document: Document,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<model::CatalogDocument> for CatalogRecord {
    fn from(document: model::CatalogDocument) -> Self {
        Self {
            document_id: document.id,
            document: into_fields(document.document),
            created_at: document.created_at.into(),
            updated_at: document.updated_at.into(),
        }
    }
}

/// A cart line.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    #[serde(rename = "_id")]
    pub entry_id: Uuid,
    /// Email of the cart owner.
    pub email: String,
    #[serde(flatten)]
    pub document: Document,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<model::CartEntry> for CartRecord {
    fn from(entry: model::CartEntry) -> Self {
        Self {
            entry_id: entry.id,
            email: entry.email,
            document: into_fields(entry.document),
            created_at: entry.created_at.into(),
            updated_at: entry.updated_at.into(),
        }
    }
}

/// Response for listing support tickets.
pub type TicketRecords = Vec<TicketRecord>;

/// Response for listing a catalog.
pub type CatalogRecords = Vec<CatalogRecord>;

/// Response for listing a cart.
pub type CartRecords = Vec<CartRecord>;
