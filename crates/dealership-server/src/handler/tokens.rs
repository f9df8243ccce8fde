//! Access token issuance.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use dealership_store::model::Document;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::IssuedToken;
use crate::service::{ServiceState, TokenCodec};

/// Tracing target for token operations.
const TRACING_TARGET: &str = "dealership_server::handler::tokens";

/// Signs the submitted claims into a one-hour access token.
///
/// The body is trusted as is; whoever posts an email receives a token for it.
#[tracing::instrument(skip_all)]
async fn issue_token(
    State(token_codec): State<TokenCodec>,
    Json(claims): Json<Document>,
) -> Result<(StatusCode, Json<IssuedToken>)> {
    let token = token_codec.issue(claims)?;

    tracing::debug!(target: TRACING_TARGET, "access token issued");
    Ok((StatusCode::OK, Json(IssuedToken::new(token))))
}

/// Returns a [`Router`] with the token route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/jwt", post(issue_token))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::handler::test::{create_test_server, create_test_state};

    #[tokio::test]
    async fn issues_verifiable_tokens() -> anyhow::Result<()> {
        let state = create_test_state(false)?;
        let server = create_test_server(state.clone())?;

        let response = server
            .post("/jwt")
            .json(&json!({"email": "jane@example.com", "name": "Jane"}))
            .await;
        response.assert_status_ok();

        let issued: IssuedToken = response.json();
        let claims = state.token_codec().verify(&issued.token)?;
        assert_eq!(claims.email(), Some("jane@example.com"));
        assert_eq!(claims.payload.get("name"), Some(&json!("Jane")));
        Ok(())
    }

    #[tokio::test]
    async fn rejects_non_object_bodies() -> anyhow::Result<()> {
        let server = create_test_server(create_test_state(false)?)?;

        let response = server.post("/jwt").json(&json!(["jane@example.com"])).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }
}
