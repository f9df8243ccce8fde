//! User record model.
//!
//! The user record is the single source of truth for a caller's role.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use serde_json::Value;
use uuid::Uuid;

use super::Document;
use crate::schema::users;
use crate::types::{HasOwner, UserRole};

/// Registered user, keyed by a unique email.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique email, the natural identity key.
    pub email: String,
    /// Administrative capability of this user.
    pub role: UserRole,
    /// Opaque profile fields, always a JSON object.
    pub profile: Value,
    /// Timestamp when the user registered.
    pub created_at: Timestamp,
    /// Timestamp when the user was last updated.
    pub updated_at: Timestamp,
}

impl User {
    /// Returns whether this user is an administrator.
    #[inline]
    pub fn is_administrator(&self) -> bool {
        self.role.is_administrator()
    }
}

impl HasOwner for User {
    fn owner_email(&self) -> &str {
        &self.email
    }
}

/// Data for registering a new user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    /// Identifier assigned on construction.
    pub id: Uuid,
    /// Unique email.
    pub email: String,
    /// Initial role.
    pub role: UserRole,
    /// Initial profile fields.
    pub profile: Value,
}

impl NewUser {
    /// Creates a regular user with the given profile fields.
    pub fn new(email: impl Into<String>, profile: Document) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: email.into(),
            role: UserRole::User,
            profile: Value::Object(profile),
        }
    }

    /// Sets the initial role.
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}
