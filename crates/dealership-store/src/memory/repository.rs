use uuid::Uuid;

use super::{MemoryStore, now};
use crate::model::{
    CartEntry, CatalogDocument, Document, NewCartEntry, NewCatalogDocument, NewSupportTicket,
    NewUser, SupportTicket, TicketChanges, User, merge_document,
};
use crate::query::{CartRepository, CatalogRepository, TicketRepository, UserRepository};
use crate::types::{CatalogKind, DeleteOutcome, UpdateOutcome, UserRole};
use crate::{StoreError, StoreResult};

/// Removes every element matching `predicate` and returns how many were removed.
fn remove_where<T>(items: &mut Vec<T>, predicate: impl Fn(&T) -> bool) -> usize {
    let before = items.len();
    items.retain(|item| !predicate(item));
    before - items.len()
}

#[async_trait::async_trait]
impl UserRepository for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let collections = self.inner.read().await;
        Ok(collections.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        let collections = self.inner.read().await;
        Ok(collections.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let mut collections = self.inner.write().await;
        if collections.users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::unique_violation(format!(
                "user with email {} already exists",
                new_user.email
            )));
        }

        let created_at = now();
        let user = User {
            id: new_user.id,
            email: new_user.email,
            role: new_user.role,
            profile: new_user.profile,
            created_at,
            updated_at: created_at,
        };

        collections.users.push(user.clone());
        Ok(user)
    }

    async fn update_user_role(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> StoreResult<UpdateOutcome> {
        let mut collections = self.inner.write().await;
        let Some(user) = collections.users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(UpdateOutcome::default());
        };

        user.role = role;
        user.updated_at = now();
        Ok(UpdateOutcome::from_affected(1))
    }

    async fn merge_user_profile(
        &self,
        email: &str,
        fields: Document,
    ) -> StoreResult<UpdateOutcome> {
        let mut collections = self.inner.write().await;
        let Some(user) = collections.users.iter_mut().find(|u| u.email == email) else {
            return Ok(UpdateOutcome::default());
        };

        merge_document(&mut user.profile, &fields);
        user.updated_at = now();
        Ok(UpdateOutcome::from_affected(1))
    }

    async fn delete_user(&self, user_id: Uuid) -> StoreResult<DeleteOutcome> {
        let mut collections = self.inner.write().await;
        let removed = remove_where(&mut collections.users, |u| u.id == user_id);
        Ok(DeleteOutcome::from_affected(removed))
    }
}

#[async_trait::async_trait]
impl TicketRepository for MemoryStore {
    async fn list_tickets(&self, owner: Option<&str>) -> StoreResult<Vec<SupportTicket>> {
        let collections = self.inner.read().await;
        let tickets = collections
            .tickets
            .iter()
            .filter(|t| owner.is_none_or(|email| t.email == email))
            .cloned()
            .collect();

        Ok(tickets)
    }

    async fn find_ticket(&self, ticket_id: Uuid) -> StoreResult<Option<SupportTicket>> {
        let collections = self.inner.read().await;
        Ok(collections.tickets.iter().find(|t| t.id == ticket_id).cloned())
    }

    async fn create_ticket(&self, new_ticket: NewSupportTicket) -> StoreResult<SupportTicket> {
        let created_at = now();
        let ticket = SupportTicket {
            id: new_ticket.id,
            email: new_ticket.email,
            status: new_ticket.status,
            content: new_ticket.content,
            created_at,
            updated_at: created_at,
        };

        self.inner.write().await.tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn update_ticket(
        &self,
        ticket_id: Uuid,
        changes: TicketChanges,
    ) -> StoreResult<UpdateOutcome> {
        let mut collections = self.inner.write().await;
        let Some(ticket) = collections.tickets.iter_mut().find(|t| t.id == ticket_id) else {
            return Ok(UpdateOutcome::default());
        };

        if let Some(status) = changes.status {
            ticket.status = status;
        }

        merge_document(&mut ticket.content, &changes.content);
        ticket.updated_at = now();
        Ok(UpdateOutcome::from_affected(1))
    }

    async fn delete_ticket(&self, ticket_id: Uuid) -> StoreResult<DeleteOutcome> {
        let mut collections = self.inner.write().await;
        let removed = remove_where(&mut collections.tickets, |t| t.id == ticket_id);
        Ok(DeleteOutcome::from_affected(removed))
    }
}

#[async_trait::async_trait]
impl CatalogRepository for MemoryStore {
    async fn list_documents(&self, kind: CatalogKind) -> StoreResult<Vec<CatalogDocument>> {
        let collections = self.inner.read().await;
        Ok(collections.catalog(kind).clone())
    }

    async fn find_document(
        &self,
        kind: CatalogKind,
        document_id: Uuid,
    ) -> StoreResult<Option<CatalogDocument>> {
        let collections = self.inner.read().await;
        let document = collections
            .catalog(kind)
            .iter()
            .find(|d| d.id == document_id)
            .cloned();

        Ok(document)
    }

    async fn create_document(
        &self,
        kind: CatalogKind,
        new_document: NewCatalogDocument,
    ) -> StoreResult<CatalogDocument> {
        let created_at = now();
        let document = CatalogDocument {
            id: new_document.id,
            document: new_document.document,
            created_at,
            updated_at: created_at,
        };

        let mut collections = self.inner.write().await;
        collections.catalog_mut(kind).push(document.clone());
        Ok(document)
    }

    async fn merge_document(
        &self,
        kind: CatalogKind,
        document_id: Uuid,
        fields: Document,
    ) -> StoreResult<UpdateOutcome> {
        let mut collections = self.inner.write().await;
        let Some(document) = collections
            .catalog_mut(kind)
            .iter_mut()
            .find(|d| d.id == document_id)
        else {
            return Ok(UpdateOutcome::default());
        };

        merge_document(&mut document.document, &fields);
        document.updated_at = now();
        Ok(UpdateOutcome::from_affected(1))
    }

    async fn delete_document(
        &self,
        kind: CatalogKind,
        document_id: Uuid,
    ) -> StoreResult<DeleteOutcome> {
        let mut collections = self.inner.write().await;
        let removed = remove_where(collections.catalog_mut(kind), |d| d.id == document_id);
        Ok(DeleteOutcome::from_affected(removed))
    }
}

#[async_trait::async_trait]
impl CartRepository for MemoryStore {
    async fn list_cart_entries(&self, email: &str) -> StoreResult<Vec<CartEntry>> {
        let collections = self.inner.read().await;
        let entries = collections
            .carts
            .iter()
            .filter(|c| c.email == email)
            .cloned()
            .collect();

        Ok(entries)
    }

    async fn find_cart_entry(&self, entry_id: Uuid) -> StoreResult<Option<CartEntry>> {
        let collections = self.inner.read().await;
        Ok(collections.carts.iter().find(|c| c.id == entry_id).cloned())
    }

    async fn create_cart_entry(&self, new_entry: NewCartEntry) -> StoreResult<CartEntry> {
        let created_at = now();
        let entry = CartEntry {
            id: new_entry.id,
            email: new_entry.email,
            document: new_entry.document,
            created_at,
            updated_at: created_at,
        };

        self.inner.write().await.carts.push(entry.clone());
        Ok(entry)
    }

    async fn delete_cart_entry(&self, entry_id: Uuid) -> StoreResult<DeleteOutcome> {
        let mut collections = self.inner.write().await;
        let removed = remove_where(&mut collections.carts, |c| c.id == entry_id);
        Ok(DeleteOutcome::from_affected(removed))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::query::Store;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn duplicate_email_is_unique_violation() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let user = store
            .create_user(NewUser::new("jane@example.com", doc(json!({ "name": "Jane" }))))
            .await?;
        assert_eq!(user.role, UserRole::User);

        let duplicate = store
            .create_user(NewUser::new("jane@example.com", Document::new()))
            .await;
        assert!(duplicate.is_err_and(|e| e.is_unique_violation()));
        Ok(())
    }

    #[tokio::test]
    async fn role_update_reports_matches() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let user = store
            .create_user(NewUser::new("jane@example.com", Document::new()))
            .await?;

        let outcome = store.update_user_role(user.id, UserRole::Admin).await?;
        assert_eq!(outcome.matched_count, 1);

        let reloaded = store.find_user_by_email("jane@example.com").await?;
        assert!(reloaded.is_some_and(|u| u.is_administrator()));

        let missing = store.update_user_role(Uuid::now_v7(), UserRole::Admin).await?;
        assert!(missing.is_unmatched());
        Ok(())
    }

    #[tokio::test]
    async fn profile_merge_keeps_unrelated_fields() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store
            .create_user(NewUser::new(
                "jane@example.com",
                doc(json!({ "name": "Jane", "city": "Oslo" })),
            ))
            .await?;

        store
            .merge_user_profile("jane@example.com", doc(json!({ "city": "Bergen" })))
            .await?;

        let user = store.find_user_by_email("jane@example.com").await?;
        let profile = user.map(|u| u.profile);
        assert_eq!(profile, Some(json!({ "name": "Jane", "city": "Bergen" })));
        Ok(())
    }

    #[tokio::test]
    async fn tickets_filter_by_owner_in_creation_order() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let first = store
            .create_ticket(NewSupportTicket::new("u@example.com", Document::new()))
            .await?;
        store
            .create_ticket(NewSupportTicket::new("v@example.com", Document::new()))
            .await?;
        let third = store
            .create_ticket(NewSupportTicket::new("u@example.com", Document::new()))
            .await?;

        let owned = store.list_tickets(Some("u@example.com")).await?;
        let ids: Vec<_> = owned.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);
        assert_eq!(store.list_tickets(None).await?.len(), 3);
        assert_eq!(first.status, "open");
        Ok(())
    }

    #[tokio::test]
    async fn ticket_update_and_delete() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let ticket = store
            .create_ticket(NewSupportTicket::new(
                "u@example.com",
                doc(json!({ "subject": "Brakes" })),
            ))
            .await?;

        let changes = TicketChanges {
            status: Some("closed".to_owned()),
            content: doc(json!({ "resolution": "replaced pads" })),
        };
        store.update_ticket(ticket.id, changes).await?;

        let updated = store.find_ticket(ticket.id).await?;
        let updated = updated.ok_or_else(|| anyhow::anyhow!("ticket vanished"))?;
        assert_eq!(updated.status, "closed");
        assert_eq!(
            updated.content,
            json!({ "subject": "Brakes", "resolution": "replaced pads" })
        );

        assert_eq!(store.delete_ticket(ticket.id).await?.deleted_count, 1);
        assert_eq!(store.delete_ticket(ticket.id).await?.deleted_count, 0);
        assert!(store.find_ticket(ticket.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn catalogs_are_separate_collections() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let category = store
            .create_document(
                CatalogKind::Category,
                NewCatalogDocument::new(doc(json!({ "name": "SUV" }))),
            )
            .await?;

        assert_eq!(store.list_documents(CatalogKind::Category).await?.len(), 1);
        assert!(store.list_documents(CatalogKind::Product).await?.is_empty());
        assert!(
            store
                .find_document(CatalogKind::ShopItem, category.id)
                .await?
                .is_none()
        );

        let outcome = store
            .merge_document(CatalogKind::Category, category.id, doc(json!({ "name": "Sedan" })))
            .await?;
        assert_eq!(outcome.modified_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn carts_are_scoped_by_email() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let entry = store
            .create_cart_entry(NewCartEntry::new("u@example.com", doc(json!({ "qty": 1 }))))
            .await?;
        store
            .create_cart_entry(NewCartEntry::new("v@example.com", Document::new()))
            .await?;

        let entries = store.list_cart_entries("u@example.com").await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, entry.id);
        assert_eq!(store.delete_cart_entry(entry.id).await?.deleted_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn close_drops_every_collection() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store
            .create_user(NewUser::new("jane@example.com", Document::new()))
            .await?;

        store.close().await;
        assert_eq!(store.backend(), "memory");
        assert!(store.find_user_by_email("jane@example.com").await?.is_none());
        Ok(())
    }
}
