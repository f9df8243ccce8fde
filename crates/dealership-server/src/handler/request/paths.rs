//! Path parameter types for HTTP handlers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path parameters addressing a user by email.
///
/// Shares the `{user}` segment with [`UserIdPathParams`].
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct UserEmailPathParams {
    /// Email of the user.
    #[serde(rename = "user")]
    pub email: String,
}

/// Path parameters addressing a user by identifier.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct UserIdPathParams {
    /// Unique identifier of the user.
    #[serde(rename = "user")]
    pub user_id: Uuid,
}

/// Path parameters for category operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPathParams {
    /// Unique identifier of the category.
    pub category_id: Uuid,
}

/// Path parameters for cart entry operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntryPathParams {
    /// Unique identifier of the cart entry.
    pub entry_id: Uuid,
}

/// Path parameters for support ticket operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPathParams {
    /// Unique identifier of the support ticket.
    pub ticket_id: Uuid,
}
