//! Administrator authorization gate.

use axum::extract::Request;

use super::Gate;
use crate::extract::Identity;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;
use crate::utility::TRACING_TARGET_AUTHORIZATION as TRACING_TARGET;

/// Requires the authenticated caller to be an administrator.
///
/// Runs after [`Authenticate`](super::Authenticate) and reads the role from
/// the user directory on every request. Unknown users and regular users are
/// rejected with `403 forbidden access`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireAdmin;

#[async_trait::async_trait]
impl Gate for RequireAdmin {
    fn name(&self) -> &'static str {
        "require_admin"
    }

    async fn check(&self, request: &mut Request, state: &ServiceState) -> Result<()> {
        let Some(email) = request.extensions().get::<Identity>().map(|i| i.email.clone()) else {
            return Err(ErrorKind::Unauthorized.into_error());
        };

        let user = state.store().find_user_by_email(&email).await?;
        if !user.is_some_and(|user| user.is_administrator()) {
            tracing::debug!(target: TRACING_TARGET, email = %email, "caller is not an administrator");
            return Err(ErrorKind::Forbidden.into_error());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;
    use dealership_store::types::UserRole;
    use serde_json::Value;

    use super::*;
    use crate::handler::test::{bearer_token, create_test_state, seed_user};
    use crate::middleware::{GatePipeline, RouterGateExt};

    fn server(state: ServiceState) -> anyhow::Result<TestServer> {
        let app = Router::new()
            .route("/", get(|| async { "welcome" }))
            .with_gates(&state, GatePipeline::administrator())
            .with_state(state);
        Ok(TestServer::new(app)?)
    }

    #[tokio::test]
    async fn regular_and_unknown_users_are_forbidden() -> anyhow::Result<()> {
        let state = create_test_state(false)?;
        seed_user(&state, "jane@example.com", UserRole::User).await?;
        let server = server(state.clone())?;

        for email in ["jane@example.com", "ghost@example.com"] {
            let response = server
                .get("/")
                .authorization_bearer(bearer_token(&state, email)?)
                .await;
            response.assert_status(StatusCode::FORBIDDEN);
            let body: Value = response.json();
            assert_eq!(body["message"], "forbidden access");
        }
        Ok(())
    }

    #[tokio::test]
    async fn administrators_pass() -> anyhow::Result<()> {
        let state = create_test_state(false)?;
        seed_user(&state, "root@example.com", UserRole::Admin).await?;
        let server = server(state.clone())?;

        server
            .get("/")
            .authorization_bearer(bearer_token(&state, "root@example.com")?)
            .await
            .assert_text("welcome");
        Ok(())
    }

    #[tokio::test]
    async fn authentication_runs_first() -> anyhow::Result<()> {
        let server = server(create_test_state(false)?)?;
        server.get("/").await.assert_status(StatusCode::UNAUTHORIZED);
        Ok(())
    }
}
