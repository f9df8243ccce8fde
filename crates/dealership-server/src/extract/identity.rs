//! Verified identity attached by the authentication gate.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use crate::handler::{Error, ErrorKind};
use crate::service::Claims;

/// Identity decoded from a verified bearer token.
///
/// Inserted into the request extensions by the authentication gate and
/// dropped with the request.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// Email claim of the token.
    pub email: String,
    /// Every claim of the token.
    pub claims: Claims,
}

impl Identity {
    /// Builds an identity from verified claims.
    ///
    /// Returns `None` when the claims carry no string `email`.
    pub fn from_claims(claims: Claims) -> Option<Self> {
        let email = claims.email()?.to_owned();
        Some(Self { email, claims })
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| ErrorKind::Unauthorized.into_error())
    }
}

impl<S> OptionalFromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned())
    }
}
