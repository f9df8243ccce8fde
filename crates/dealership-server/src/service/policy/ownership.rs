//! Ownership policy: administrators act on anything, users on their own records.

use dealership_store::types::{HasOwner, UserRole};

/// The authenticated principal on whose behalf a request runs.
///
/// The email comes from the verified token and the role from the user
/// directory. A caller without a user record acts as [`UserRole::User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Email carried by the verified token.
    pub email: String,
    /// Role loaded from the user directory.
    pub role: UserRole,
}

/// Ownership rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// The record would be owned by an empty email.
    #[error("owner email cannot be empty")]
    EmptyOwner,
    /// The caller is neither the owner nor an administrator.
    #[error("caller does not own this record")]
    NotOwner,
}

impl Caller {
    /// Creates a new caller.
    pub fn new(email: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    /// Returns whether the caller has administrative privileges.
    #[inline]
    pub fn is_administrator(&self) -> bool {
        self.role.is_administrator()
    }

    /// Returns whether the caller may act on a record owned by `owner_email`.
    #[inline]
    pub fn can_act(&self, owner_email: &str) -> bool {
        self.is_administrator() || self.email == owner_email
    }

    /// Returns whether the caller may act on `record`.
    #[inline]
    pub fn can_act_on(&self, record: &impl HasOwner) -> bool {
        self.is_administrator() || record.is_owned_by(&self.email)
    }

    /// Fails with [`PolicyError::NotOwner`] unless the caller may act on `record`.
    pub fn authorize(&self, record: &impl HasOwner) -> Result<(), PolicyError> {
        if self.can_act_on(record) {
            Ok(())
        } else {
            Err(PolicyError::NotOwner)
        }
    }

    /// Returns the owner filter to apply to a listing.
    ///
    /// Administrators get the requested filter, or none at all. Everyone else
    /// is pinned to their own email regardless of what they asked for.
    pub fn listing_scope(&self, requested: Option<String>) -> Option<String> {
        if self.is_administrator() {
            requested.filter(|email| !email.is_empty())
        } else {
            Some(self.email.clone())
        }
    }

    /// Resolves the owner of a record the caller is creating.
    ///
    /// An omitted owner defaults to the caller. Creating on behalf of someone
    /// else requires administrative privileges.
    pub fn resolve_owner(&self, requested: Option<String>) -> Result<String, PolicyError> {
        let owner = requested.unwrap_or_else(|| self.email.clone());

        if owner.trim().is_empty() {
            return Err(PolicyError::EmptyOwner);
        }

        if !self.can_act(&owner) {
            return Err(PolicyError::NotOwner);
        }

        Ok(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Owned(&'static str);

    impl HasOwner for Owned {
        fn owner_email(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn can_act_truth_table() {
        let cases = [
            (UserRole::Admin, "a@x.io", "a@x.io", true),
            (UserRole::Admin, "a@x.io", "b@x.io", true),
            (UserRole::User, "a@x.io", "a@x.io", true),
            (UserRole::User, "a@x.io", "b@x.io", false),
        ];

        for (role, email, owner, expected) in cases {
            let caller = Caller::new(email, role);
            assert_eq!(caller.can_act(owner), expected, "{role} {email} on {owner}");
            assert_eq!(caller.can_act_on(&Owned(owner)), expected);
        }
    }

    #[test]
    fn authorize_rejects_foreign_records() {
        let caller = Caller::new("a@x.io", UserRole::User);
        assert_eq!(caller.authorize(&Owned("a@x.io")), Ok(()));
        assert_eq!(caller.authorize(&Owned("b@x.io")), Err(PolicyError::NotOwner));
    }

    #[test]
    fn listing_scope_pins_regular_users() {
        let user = Caller::new("a@x.io", UserRole::User);
        assert_eq!(user.listing_scope(None), Some("a@x.io".to_owned()));
        assert_eq!(
            user.listing_scope(Some("b@x.io".to_owned())),
            Some("a@x.io".to_owned())
        );

        let admin = Caller::new("root@x.io", UserRole::Admin);
        assert_eq!(admin.listing_scope(None), None);
        assert_eq!(admin.listing_scope(Some(String::new())), None);
        assert_eq!(
            admin.listing_scope(Some("b@x.io".to_owned())),
            Some("b@x.io".to_owned())
        );
    }

    #[test]
    fn resolve_owner_rules() {
        let user = Caller::new("a@x.io", UserRole::User);
        assert_eq!(user.resolve_owner(None), Ok("a@x.io".to_owned()));
        assert_eq!(
            user.resolve_owner(Some("a@x.io".to_owned())),
            Ok("a@x.io".to_owned())
        );
        assert_eq!(
            user.resolve_owner(Some("b@x.io".to_owned())),
            Err(PolicyError::NotOwner)
        );
        assert_eq!(
            user.resolve_owner(Some(String::new())),
            Err(PolicyError::EmptyOwner)
        );

        let admin = Caller::new("root@x.io", UserRole::Admin);
        assert_eq!(
            admin.resolve_owner(Some("b@x.io".to_owned())),
            Ok("b@x.io".to_owned())
        );
        assert_eq!(
            admin.resolve_owner(Some(String::new())),
            Err(PolicyError::EmptyOwner)
        );
    }
}
