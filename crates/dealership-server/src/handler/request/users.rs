//! User request types.

use dealership_store::model::{Document, NewUser};
use dealership_store::types::UserRole;
use serde::{Deserialize, Serialize};

/// Profile keys a client may never set directly.
const PROTECTED_PROFILE_KEYS: [&str; 3] = ["_id", "email", "role"];

fn strip_protected(mut profile: Document) -> Document {
    for key in PROTECTED_PROFILE_KEYS {
        profile.remove(key);
    }
    profile
}

/// Request payload for registering a user.
///
/// A submitted `role` is ignored; every new user starts as a regular user.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Unique email of the user.
    pub email: String,
    /// Remaining profile fields.
    #[serde(flatten)]
    pub profile: Document,
}

impl CreateUser {
    /// Returns the email with surrounding whitespace removed.
    pub fn email(&self) -> &str {
        self.email.trim()
    }

    /// Converts the request into a model for insertion.
    pub fn into_model(self) -> NewUser {
        let email = self.email().to_owned();
        NewUser::new(email, strip_protected(self.profile))
    }
}

/// Request payload for changing a user's role.
#[must_use]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateRole {
    /// The new role.
    pub role: UserRole,
}

/// Request payload for a user's update of their own profile.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// Profile fields to merge.
    #[serde(flatten)]
    pub fields: Document,
}

impl UpdateProfile {
    /// Returns the fields to merge, without the protected keys.
    pub fn into_fields(self) -> Document {
        strip_protected(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn registration_ignores_role() -> anyhow::Result<()> {
        let request: CreateUser = serde_json::from_value(json!({
            "email": " jane@example.com ",
            "name": "Jane",
            "role": "admin",
        }))?;

        let new_user = request.into_model();
        assert_eq!(new_user.email, "jane@example.com");
        assert_eq!(new_user.role, UserRole::User);
        assert_eq!(new_user.profile, json!({"name": "Jane"}));
        Ok(())
    }

    #[test]
    fn profile_update_cannot_touch_identity() -> anyhow::Result<()> {
        let request: UpdateProfile = serde_json::from_value(json!({
            "email": "mallory@example.com",
            "role": "admin",
            "photo": "avatar.png",
        }))?;

        let fields = request.into_fields();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("photo"));
        Ok(())
    }
}
