//! Caller extraction: verified identity plus the role from the user directory.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use dealership_store::SharedStore;

use crate::extract::Identity;
use crate::handler::Error;
use crate::service::Caller;
use crate::utility::TRACING_TARGET_AUTHORIZATION as TRACING_TARGET;

impl<S> FromRequestParts<S> for Caller
where
    SharedStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    // A verified identity without a user record acts as a regular user.
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        let store = SharedStore::from_ref(state);

        let role = store
            .find_user_by_email(&identity.email)
            .await?
            .map(|user| user.role)
            .unwrap_or_default();

        tracing::trace!(
            target: TRACING_TARGET,
            email = %identity.email,
            role = %role,
            "caller resolved"
        );

        Ok(Caller::new(identity.email, role))
    }
}
