//! Wishlist and cart repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{CartEntry, NewCartEntry};
use crate::types::DeleteOutcome;
use crate::{PgClient, StoreError, StoreResult, schema};

/// Repository for cart lines.
#[async_trait::async_trait]
pub trait CartRepository: Send + Sync {
    /// Lists the cart lines owned by `email`, oldest first.
    async fn list_cart_entries(&self, email: &str) -> StoreResult<Vec<CartEntry>>;

    /// Finds a cart line by identifier.
    async fn find_cart_entry(&self, entry_id: Uuid) -> StoreResult<Option<CartEntry>>;

    /// Adds a cart line.
    async fn create_cart_entry(&self, new_entry: NewCartEntry) -> StoreResult<CartEntry>;

    /// Removes a cart line.
    async fn delete_cart_entry(&self, entry_id: Uuid) -> StoreResult<DeleteOutcome>;
}

#[async_trait::async_trait]
impl CartRepository for PgClient {
    async fn list_cart_entries(&self, email: &str) -> StoreResult<Vec<CartEntry>> {
        use schema::carts::{self, dsl};

        let mut conn = self.get_connection().await?;
        carts::table
            .filter(dsl::email.eq(email))
            .order(dsl::created_at.asc())
            .select(CartEntry::as_select())
            .load(&mut *conn)
            .await
            .map_err(StoreError::from)
    }

    async fn find_cart_entry(&self, entry_id: Uuid) -> StoreResult<Option<CartEntry>> {
        use schema::carts::{self, dsl};

        let mut conn = self.get_connection().await?;
        carts::table
            .filter(dsl::id.eq(entry_id))
            .select(CartEntry::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(StoreError::from)
    }

    async fn create_cart_entry(&self, new_entry: NewCartEntry) -> StoreResult<CartEntry> {
        use schema::carts;

        let mut conn = self.get_connection().await?;
        diesel::insert_into(carts::table)
            .values(&new_entry)
            .returning(CartEntry::as_returning())
            .get_result(&mut *conn)
            .await
            .map_err(StoreError::from)
    }

    async fn delete_cart_entry(&self, entry_id: Uuid) -> StoreResult<DeleteOutcome> {
        use schema::carts::{self, dsl};

        let mut conn = self.get_connection().await?;
        let affected = diesel::delete(carts::table.filter(dsl::id.eq(entry_id)))
            .execute(&mut *conn)
            .await?;

        Ok(DeleteOutcome::from_affected(affected))
    }
}
