//! Support ticket repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff_diesel::Timestamp;
use serde_json::Value;
use uuid::Uuid;

use crate::model::{NewSupportTicket, SupportTicket, TicketChanges};
use crate::types::{DeleteOutcome, UpdateOutcome};
use crate::{PgClient, StoreError, StoreResult, schema};

/// Repository for support tickets.
#[async_trait::async_trait]
pub trait TicketRepository: Send + Sync {
    /// Lists tickets oldest first, optionally restricted to one owner.
    async fn list_tickets(&self, owner: Option<&str>) -> StoreResult<Vec<SupportTicket>>;

    /// Finds a ticket by identifier.
    async fn find_ticket(&self, ticket_id: Uuid) -> StoreResult<Option<SupportTicket>>;

    /// Opens a new ticket.
    async fn create_ticket(&self, new_ticket: NewSupportTicket) -> StoreResult<SupportTicket>;

    /// Applies status and content changes to a ticket.
    async fn update_ticket(
        &self,
        ticket_id: Uuid,
        changes: TicketChanges,
    ) -> StoreResult<UpdateOutcome>;

    /// Permanently deletes a ticket.
    async fn delete_ticket(&self, ticket_id: Uuid) -> StoreResult<DeleteOutcome>;
}

#[async_trait::async_trait]
impl TicketRepository for PgClient {
    async fn list_tickets(&self, owner: Option<&str>) -> StoreResult<Vec<SupportTicket>> {
        use schema::support_tickets::{self, dsl};

        let mut conn = self.get_connection().await?;
        let mut query = support_tickets::table
            .select(SupportTicket::as_select())
            .order(dsl::created_at.asc())
            .into_boxed();

        if let Some(email) = owner {
            query = query.filter(dsl::email.eq(email));
        }

        query.load(&mut *conn).await.map_err(StoreError::from)
    }

    async fn find_ticket(&self, ticket_id: Uuid) -> StoreResult<Option<SupportTicket>> {
        use schema::support_tickets::{self, dsl};

        let mut conn = self.get_connection().await?;
        support_tickets::table
            .filter(dsl::id.eq(ticket_id))
            .select(SupportTicket::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(StoreError::from)
    }

    async fn create_ticket(&self, new_ticket: NewSupportTicket) -> StoreResult<SupportTicket> {
        use schema::support_tickets;

        let mut conn = self.get_connection().await?;
        diesel::insert_into(support_tickets::table)
            .values(&new_ticket)
            .returning(SupportTicket::as_returning())
            .get_result(&mut *conn)
            .await
            .map_err(StoreError::from)
    }

    async fn update_ticket(
        &self,
        ticket_id: Uuid,
        changes: TicketChanges,
    ) -> StoreResult<UpdateOutcome> {
        use schema::support_tickets::{self, dsl};

        let mut conn = self.get_connection().await?;
        let target = support_tickets::table.filter(dsl::id.eq(ticket_id));
        let content = dsl::content.eq(dsl::content.concat(Value::Object(changes.content)));
        let updated_at = dsl::updated_at.eq(Timestamp::from(jiff::Timestamp::now()));

        let affected = match changes.status {
            Some(status) => {
                diesel::update(target)
                    .set((dsl::status.eq(status), content, updated_at))
                    .execute(&mut *conn)
                    .await?
            }
            None => {
                diesel::update(target)
                    .set((content, updated_at))
                    .execute(&mut *conn)
                    .await?
            }
        };

        Ok(UpdateOutcome::from_affected(affected))
    }

    async fn delete_ticket(&self, ticket_id: Uuid) -> StoreResult<DeleteOutcome> {
        use schema::support_tickets::{self, dsl};

        let mut conn = self.get_connection().await?;
        let affected = diesel::delete(support_tickets::table.filter(dsl::id.eq(ticket_id)))
            .execute(&mut *conn)
            .await?;

        Ok(DeleteOutcome::from_affected(affected))
    }
}
