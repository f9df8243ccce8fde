//! Wishlist and cart line model.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use serde_json::Value;
use uuid::Uuid;

use super::Document;
use crate::schema::carts;
use crate::types::HasOwner;

/// Cart line owned by a user.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = carts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Owner email.
    pub email: String,
    /// Line fields such as the product reference and quantity.
    pub document: Value,
    /// Timestamp when the entry was added.
    pub created_at: Timestamp,
    /// Timestamp when the entry was last updated.
    pub updated_at: Timestamp,
}

impl HasOwner for CartEntry {
    fn owner_email(&self) -> &str {
        &self.email
    }
}

/// Data for adding a cart line.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = carts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCartEntry {
    /// Identifier assigned on construction.
    pub id: Uuid,
    /// Owner email.
    pub email: String,
    /// Line fields.
    pub document: Value,
}

impl NewCartEntry {
    /// Creates a cart line owned by `email`.
    pub fn new(email: impl Into<String>, document: Document) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: email.into(),
            document: Value::Object(document),
        }
    }
}
