//! Cart request types.

use dealership_store::model::Document;
use serde::{Deserialize, Serialize};

/// Request payload for adding a cart entry.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCartEntry {
    /// Owner of the entry; defaults to the caller.
    #[serde(default)]
    pub email: Option<String>,
    /// The cart line itself.
    #[serde(flatten)]
    pub document: Document,
}

impl CreateCartEntry {
    /// Returns the cart line without keys owned by the record.
    pub fn into_document(self) -> Document {
        let mut document = self.document;
        document.remove("_id");
        document
    }
}

/// Query parameters for listing a cart.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartQuery {
    /// Owner of the cart.
    pub email: String,
}
