//! User directory repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff_diesel::Timestamp;
use serde_json::Value;
use uuid::Uuid;

use crate::model::{Document, NewUser, User};
use crate::types::{DeleteOutcome, UpdateOutcome, UserRole};
use crate::{PgClient, StoreError, StoreResult, schema};

/// Repository for user records.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by email.
    ///
    /// Returns `None` when no user registered with this email.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Finds a user by identifier.
    async fn find_user_by_id(&self, user_id: Uuid) -> StoreResult<Option<User>>;

    /// Inserts a new user.
    ///
    /// Fails with a unique violation when the email is taken.
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User>;

    /// Replaces the role of a user.
    async fn update_user_role(&self, user_id: Uuid, role: UserRole)
    -> StoreResult<UpdateOutcome>;

    /// Merges profile fields into the user registered with `email`.
    async fn merge_user_profile(&self, email: &str, fields: Document)
    -> StoreResult<UpdateOutcome>;

    /// Permanently deletes a user.
    async fn delete_user(&self, user_id: Uuid) -> StoreResult<DeleteOutcome>;
}

#[async_trait::async_trait]
impl UserRepository for PgClient {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        use schema::users::{self, dsl};

        let mut conn = self.get_connection().await?;
        users::table
            .filter(dsl::email.eq(email))
            .select(User::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(StoreError::from)
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        use schema::users::{self, dsl};

        let mut conn = self.get_connection().await?;
        users::table
            .filter(dsl::id.eq(user_id))
            .select(User::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(StoreError::from)
    }

    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        use schema::users;

        let mut conn = self.get_connection().await?;
        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut *conn)
            .await
            .map_err(StoreError::from)
    }

    async fn update_user_role(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> StoreResult<UpdateOutcome> {
        use schema::users::{self, dsl};

        let mut conn = self.get_connection().await?;
        let affected = diesel::update(users::table.filter(dsl::id.eq(user_id)))
            .set((
                dsl::role.eq(role),
                dsl::updated_at.eq(Timestamp::from(jiff::Timestamp::now())),
            ))
            .execute(&mut *conn)
            .await?;

        Ok(UpdateOutcome::from_affected(affected))
    }

    async fn merge_user_profile(
        &self,
        email: &str,
        fields: Document,
    ) -> StoreResult<UpdateOutcome> {
        use schema::users::{self, dsl};

        let mut conn = self.get_connection().await?;
        let affected = diesel::update(users::table.filter(dsl::email.eq(email)))
            .set((
                dsl::profile.eq(dsl::profile.concat(Value::Object(fields))),
                dsl::updated_at.eq(Timestamp::from(jiff::Timestamp::now())),
            ))
            .execute(&mut *conn)
            .await?;

        Ok(UpdateOutcome::from_affected(affected))
    }

    async fn delete_user(&self, user_id: Uuid) -> StoreResult<DeleteOutcome> {
        use schema::users::{self, dsl};

        let mut conn = self.get_connection().await?;
        let affected = diesel::delete(users::table.filter(dsl::id.eq(user_id)))
            .execute(&mut *conn)
            .await?;

        Ok(DeleteOutcome::from_affected(affected))
    }
}
