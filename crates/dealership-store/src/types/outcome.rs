//! Results of write operations, shaped after document-store acknowledgements.

use uuid::Uuid;

/// Result of inserting a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Identifier assigned to the new record.
    pub inserted_id: Uuid,
}

impl InsertOutcome {
    /// Creates an outcome for the given identifier.
    #[inline]
    pub fn new(inserted_id: Uuid) -> Self {
        Self { inserted_id }
    }
}

/// Result of updating records matched by a key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Number of records matched by the filter.
    pub matched_count: u64,
    /// Number of records written.
    pub modified_count: u64,
}

impl UpdateOutcome {
    /// Creates an outcome from the number of affected rows.
    ///
    /// Every matched row is rewritten, so both counters are equal.
    #[inline]
    pub fn from_affected(affected: usize) -> Self {
        let affected = affected as u64;
        Self {
            matched_count: affected,
            modified_count: affected,
        }
    }

    /// Returns whether the filter matched nothing.
    #[inline]
    pub fn is_unmatched(&self) -> bool {
        self.matched_count == 0
    }
}

/// Result of deleting records matched by a key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Number of records removed.
    pub deleted_count: u64,
}

impl DeleteOutcome {
    /// Creates an outcome from the number of affected rows.
    #[inline]
    pub fn from_affected(affected: usize) -> Self {
        Self {
            deleted_count: affected as u64,
        }
    }
}
