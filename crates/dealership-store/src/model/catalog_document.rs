//! Catalog document model shared by categories, products and shop items.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use serde_json::Value;
use uuid::Uuid;

use super::Document;

/// Catalog entry holding an arbitrary JSON object.
///
/// Loaded from any of the catalog tables with an explicit column tuple.
#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct CatalogDocument {
    /// Unique document identifier.
    pub id: Uuid,
    /// Document fields, always a JSON object.
    pub document: Value,
    /// Timestamp when the document was created.
    pub created_at: Timestamp,
    /// Timestamp when the document was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a catalog document.
#[derive(Debug, Clone)]
pub struct NewCatalogDocument {
    /// Identifier assigned on construction.
    pub id: Uuid,
    /// Document fields.
    pub document: Value,
}

impl NewCatalogDocument {
    /// Creates a document with a fresh identifier.
    pub fn new(document: Document) -> Self {
        Self {
            id: Uuid::now_v7(),
            document: Value::Object(document),
        }
    }
}
