//! Response structures for token issuance.

use serde::{Deserialize, Serialize};

/// A freshly signed access token.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Signed HS256 token, valid for one hour.
    pub token: String,
}

impl IssuedToken {
    /// Wraps a signed token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}
