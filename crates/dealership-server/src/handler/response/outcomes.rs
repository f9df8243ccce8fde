//! Acknowledgements of store writes.

use dealership_store::types::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message returned when registering an email that already exists.
pub const USER_ALREADY_EXISTS: &str = "user already exists";

/// Acknowledgement of an insert.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inserted {
    /// Always `true`; failures are reported as errors.
    pub acknowledged: bool,
    /// Identifier assigned to the new record.
    pub inserted_id: Uuid,
}

impl From<InsertOutcome> for Inserted {
    fn from(outcome: InsertOutcome) -> Self {
        Self {
            acknowledged: true,
            inserted_id: outcome.inserted_id,
        }
    }
}

/// Result of an idempotent user registration.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Registration {
    /// A new user record was created.
    Created(Inserted),
    /// A user with this email already existed; nothing was written.
    Existing {
        /// Always [`USER_ALREADY_EXISTS`].
        message: String,
        /// Always `null`.
        #[serde(rename = "insertedId")]
        inserted_id: Option<Uuid>,
    },
}

impl Registration {
    /// Returns the response for an email that is already registered.
    pub fn existing() -> Self {
        Self::Existing {
            message: USER_ALREADY_EXISTS.to_owned(),
            inserted_id: None,
        }
    }
}

/// Acknowledgement of an update.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Updated {
    /// Always `true`; failures are reported as errors.
    pub acknowledged: bool,
    /// Number of records matching the filter.
    pub matched_count: u64,
    /// Number of records written.
    pub modified_count: u64,
}

impl From<UpdateOutcome> for Updated {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: outcome.matched_count,
            modified_count: outcome.modified_count,
        }
    }
}

/// Acknowledgement of a delete.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    /// Always `true`; failures are reported as errors.
    pub acknowledged: bool,
    /// Number of records removed.
    pub deleted_count: u64,
}

impl From<DeleteOutcome> for Deleted {
    fn from(outcome: DeleteOutcome) -> Self {
        Self {
            acknowledged: true,
            deleted_count: outcome.deleted_count,
        }
    }
}
