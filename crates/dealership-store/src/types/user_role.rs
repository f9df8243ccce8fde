//! User role enumeration for administrative access control.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The single role attribute carried by every user record.
///
/// This enumeration corresponds to the `USER_ROLE` PostgreSQL enum. A record
/// without an explicit role decodes to [`UserRole::User`].
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
pub enum UserRole {
    /// Regular customer account.
    #[db_rename = "user"]
    #[serde(rename = "user")]
    #[strum(serialize = "user")]
    #[default]
    User,

    /// Administrative account that may act on any record.
    #[db_rename = "admin"]
    #[serde(rename = "admin")]
    #[strum(serialize = "admin")]
    Admin,
}

impl UserRole {
    /// Returns whether this role has administrative privileges.
    #[inline]
    pub fn is_administrator(self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn defaults_to_user() {
        assert_eq!(UserRole::default(), UserRole::User);
        assert!(!UserRole::default().is_administrator());
    }

    #[test]
    fn parses_lowercase_names() {
        assert_eq!(UserRole::from_str("admin").ok(), Some(UserRole::Admin));
        assert_eq!(UserRole::from_str("user").ok(), Some(UserRole::User));
        assert!(UserRole::from_str("owner").is_err());
    }

    #[test]
    fn serializes_as_lowercase_string() -> anyhow::Result<()> {
        for role in UserRole::iter() {
            let json = serde_json::to_value(role)?;
            assert_eq!(json, serde_json::Value::String(role.to_string()));
        }
        Ok(())
    }
}
