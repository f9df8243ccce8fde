//! Ownership helper trait for records that belong to a user by email.

/// Records owned by a user, identified by the owner's email.
pub trait HasOwner {
    /// Returns the owner's email.
    fn owner_email(&self) -> &str;

    /// Returns whether the given email owns this record.
    #[inline]
    fn is_owned_by(&self, email: &str) -> bool {
        self.owner_email() == email
    }
}
