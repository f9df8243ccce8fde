//! Database models for every collection.
//!
//! Each model comes with a `New*` counterpart used for inserts. Identifiers
//! are UUID v7, assigned on construction so both backends agree on them.

mod cart_entry;
mod catalog_document;
mod support_ticket;
mod user;

pub use cart_entry::{CartEntry, NewCartEntry};
pub use catalog_document::{CatalogDocument, NewCatalogDocument};
pub use support_ticket::{DEFAULT_TICKET_STATUS, NewSupportTicket, SupportTicket, TicketChanges};
pub use user::{NewUser, User};

use serde_json::{Map, Value};

/// JSON object holding the opaque fields of a record.
pub type Document = Map<String, Value>;

/// Shallow-merges `changes` into `target`, overwriting existing keys.
pub(crate) fn merge_document(target: &mut Value, changes: &Document) {
    if !target.is_object() {
        *target = Value::Object(Document::new());
    }

    if let Value::Object(map) = target {
        for (key, value) in changes {
            map.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn merge_overwrites_and_keeps_other_keys() {
        let mut target = json!({ "name": "Jane", "city": "Oslo" });
        let changes = json!({ "city": "Bergen", "phone": "123" })
            .as_object()
            .cloned()
            .unwrap_or_default();

        merge_document(&mut target, &changes);
        assert_eq!(
            target,
            json!({ "name": "Jane", "city": "Bergen", "phone": "123" })
        );
    }

    #[test]
    fn merge_replaces_non_object_target() {
        let mut target = json!(null);
        let changes = json!({ "a": 1 }).as_object().cloned().unwrap_or_default();
        merge_document(&mut target, &changes);
        assert_eq!(target, json!({ "a": 1 }));
    }
}
