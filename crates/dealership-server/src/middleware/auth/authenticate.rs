//! Bearer token authentication gate.

use axum::extract::Request;
use axum::http::header;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};

use super::Gate;
use crate::extract::Identity;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;
use crate::utility::TRACING_TARGET_AUTHENTICATION as TRACING_TARGET;

/// Verifies the bearer token and attaches the caller's [`Identity`].
///
/// - No `Authorization` header: `401 unauthorized access`.
/// - A header that is not a bearer token, or a token that fails
///   verification or carries no `email`: `401 Token expired or unauthorized
///   access`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Authenticate;

#[async_trait::async_trait]
impl Gate for Authenticate {
    fn name(&self) -> &'static str {
        "authenticate"
    }

    async fn check(&self, request: &mut Request, state: &ServiceState) -> Result<()> {
        let headers = request.headers();
        if !headers.contains_key(header::AUTHORIZATION) {
            return Err(ErrorKind::MissingAuthToken.into_error());
        }

        let Some(authorization) = headers.typed_get::<Authorization<Bearer>>() else {
            tracing::debug!(target: TRACING_TARGET, "authorization header is not a bearer token");
            return Err(ErrorKind::MalformedAuthToken.into_error());
        };

        let claims = state.token_codec().verify(authorization.token())?;

        let Some(identity) = Identity::from_claims(claims) else {
            tracing::debug!(target: TRACING_TARGET, "verified token carries no email claim");
            return Err(ErrorKind::Unauthorized.into_error());
        };

        tracing::trace!(target: TRACING_TARGET, email = %identity.email, "request authenticated");
        request.extensions_mut().insert(identity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::Router;
    use axum::http::{HeaderValue, StatusCode};
    use axum::routing::get;
    use axum_test::TestServer;
    use jiff::{SignedDuration, Timestamp};
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::{bearer_token, create_test_state, document};
    use crate::middleware::{GatePipeline, RouterGateExt};
    use crate::service::TokenCodec;

    fn server(state: ServiceState, calls: Arc<AtomicUsize>) -> anyhow::Result<TestServer> {
        let app = Router::new()
            .route(
                "/",
                get(move |identity: Identity| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    identity.email
                }),
            )
            .with_gates(&state, GatePipeline::authenticated())
            .with_state(state);
        Ok(TestServer::new(app)?)
    }

    #[tokio::test]
    async fn missing_header_never_reaches_handler() -> anyhow::Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let server = server(create_test_state(false)?, calls.clone())?;

        let response = server.get("/").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["message"], "unauthorized access");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_tokens_are_rejected() -> anyhow::Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = create_test_state(false)?;
        let server = server(state.clone(), calls.clone())?;

        let foreign = TokenCodec::new("another-secret")?;
        let forged = foreign.issue(document(json!({"email": "jane@example.com"})))?;
        let expired = state.token_codec().issue_at(
            document(json!({"email": "jane@example.com"})),
            Timestamp::now() - SignedDuration::from_hours(2),
        )?;
        let anonymous = state.token_codec().issue(document(json!({"name": "Jane"})))?;

        let headers = [
            "Basic amFuZTpzZWNyZXQ=".to_owned(),
            "Bearer".to_owned(),
            "Bearer not-a-token".to_owned(),
            format!("Bearer {forged}"),
            format!("Bearer {expired}"),
            format!("Bearer {anonymous}"),
        ];

        for value in headers {
            let response = server
                .get("/")
                .add_header(header::AUTHORIZATION, HeaderValue::from_str(&value)?)
                .await;
            response.assert_status(StatusCode::UNAUTHORIZED);
            let body: Value = response.json();
            assert_eq!(body["message"], "Token expired or unauthorized access");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[tokio::test]
    async fn valid_token_attaches_identity() -> anyhow::Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = create_test_state(false)?;
        let server = server(state.clone(), calls.clone())?;

        let token = bearer_token(&state, "jane@example.com")?;
        server
            .get("/")
            .authorization_bearer(token)
            .await
            .assert_text("jane@example.com");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        Ok(())
    }
}
