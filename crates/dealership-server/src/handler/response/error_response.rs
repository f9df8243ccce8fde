use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Body of every error response.
///
/// The status code is carried alongside but never serialized.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier
    pub name: Cow<'a, str>,
    /// User-facing error message
    pub message: Cow<'a, str>,
    /// Underlying failure, set for internal errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Cow<'a, str>>,
    /// The resource that the error relates to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request could not be processed due to invalid data",
        StatusCode::BAD_REQUEST,
    );
    pub const FORBIDDEN: Self = Self::new("forbidden", "forbidden access", StatusCode::FORBIDDEN);
    pub const MALFORMED_AUTH_TOKEN: Self = Self::new(
        "malformed_auth_token",
        "Token expired or unauthorized access",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_AUTH_TOKEN: Self = Self::new(
        "missing_auth_token",
        "unauthorized access",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_PATH_PARAM: Self = Self::new(
        "missing_path_param",
        "Invalid request: missing required parameters",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "The requested resource was not found",
        StatusCode::NOT_FOUND,
    );
    pub const UNAUTHORIZED: Self = Self::new(
        "unauthorized",
        "Token expired or unauthorized access",
        StatusCode::UNAUTHORIZED,
    );

    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            error: None,
            resource: None,
            status,
        }
    }

    /// Sets the resource the error relates to.
    /// If a resource already exists, it merges them with a separator.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let new_resource = resource.into();
        self.resource = Some(match self.resource {
            Some(existing) => Cow::Owned(format!("{existing}/{new_resource}")),
            None => new_resource,
        });
        self
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches the underlying failure.
    /// If one already exists, it merges them with a separator.
    pub fn with_error(mut self, error: impl Into<Cow<'a, str>>) -> Self {
        let new_error = error.into();
        self.error = Some(match self.error {
            Some(existing) => Cow::Owned(format!("{existing}; {new_error}")),
            None => new_error,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_resources() {
        let response = ErrorResponse::NOT_FOUND
            .with_resource("users")
            .with_resource("profile");

        assert_eq!(response.resource.as_deref(), Some("users/profile"));
    }

    #[test]
    fn message_replaces_default() {
        let response = ErrorResponse::NOT_FOUND.with_message("ticket not found");
        assert_eq!(response.message, "ticket not found");
    }

    #[test]
    fn merges_errors() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_error("connection refused")
            .with_error("pool closed");

        assert_eq!(
            response.error.as_deref(),
            Some("connection refused; pool closed")
        );
    }

    #[test]
    fn serializes_without_status() -> anyhow::Result<()> {
        let json = serde_json::to_value(ErrorResponse::FORBIDDEN)?;
        assert_eq!(
            json,
            serde_json::json!({ "name": "forbidden", "message": "forbidden access" })
        );
        Ok(())
    }
}
