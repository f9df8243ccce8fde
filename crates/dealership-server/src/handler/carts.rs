//! Cart handlers.
//!
//! Carts are listed publicly by email. Adding and removing entries requires a
//! verified caller who owns the entry or is an administrator.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use dealership_store::SharedStore;
use dealership_store::model::NewCartEntry;
use dealership_store::types::InsertOutcome;

use crate::extract::{Caller, Json, Path, Query};
use crate::handler::request::{CartEntryPathParams, CartQuery, CreateCartEntry};
use crate::handler::response::{CartRecords, Deleted, Inserted};
use crate::handler::{ErrorKind, Result};
use crate::middleware::{GatePipeline, RouterGateExt};
use crate::service::ServiceState;

/// Tracing target for cart operations.
const TRACING_TARGET: &str = "dealership_server::handler::carts";

#[tracing::instrument(skip_all)]
async fn list_cart(
    State(store): State<SharedStore>,
    Query(query): Query<CartQuery>,
) -> Result<(StatusCode, Json<CartRecords>)> {
    if query.email.trim().is_empty() {
        return Err(ErrorKind::BadRequest.with_message("email is required"));
    }

    let entries = store.list_cart_entries(&query.email).await?;
    let entries = entries.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(entries)))
}

#[tracing::instrument(skip_all, fields(caller = %caller.email))]
async fn add_cart_entry(
    State(store): State<SharedStore>,
    caller: Caller,
    Json(mut request): Json<CreateCartEntry>,
) -> Result<(StatusCode, Json<Inserted>)> {
    let owner = caller.resolve_owner(request.email.take())?;
    let new_entry = NewCartEntry::new(owner, request.into_document());

    let entry = store.create_cart_entry(new_entry).await?;

    tracing::info!(
        target: TRACING_TARGET,
        entry_id = %entry.id,
        "cart entry added"
    );

    Ok((StatusCode::CREATED, Json(InsertOutcome::new(entry.id).into())))
}

#[tracing::instrument(skip_all, fields(caller = %caller.email, entry_id = %path_params.entry_id))]
async fn remove_cart_entry(
    State(store): State<SharedStore>,
    caller: Caller,
    Path(path_params): Path<CartEntryPathParams>,
) -> Result<(StatusCode, Json<Deleted>)> {
    let Some(entry) = store.find_cart_entry(path_params.entry_id).await? else {
        return Err(ErrorKind::NotFound
            .with_message("cart entry not found")
            .with_resource("cart"));
    };

    caller.authorize(&entry)?;

    let outcome = store.delete_cart_entry(entry.id).await?;

    tracing::info!(
        target: TRACING_TARGET,
        deleted = outcome.deleted_count,
        "cart entry removed"
    );

    Ok((StatusCode::OK, Json(outcome.into())))
}

/// Returns a [`Router`] with all cart routes.
pub fn routes(state: &ServiceState) -> Router<ServiceState> {
    let public = Router::new().route("/carts", get(list_cart));

    let authenticated = Router::new()
        .route("/carts", post(add_cart_entry))
        .route("/carts/{entryId}", delete(remove_cart_entry))
        .with_gates(state, GatePipeline::authenticated());

    public.merge(authenticated)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use dealership_store::types::UserRole;
    use serde_json::{Value, json};

    use crate::handler::test::{bearer_token, create_test_server, create_test_state, seed_user};

    #[tokio::test]
    async fn owners_manage_their_cart() -> anyhow::Result<()> {
        let state = create_test_state(false)?;
        let server = create_test_server(state.clone())?;
        let token = bearer_token(&state, "jane@example.com")?;

        let created = server
            .post("/carts")
            .authorization_bearer(&token)
            .json(&json!({"productId": "roadster", "quantity": 1}))
            .await;
        created.assert_status(StatusCode::CREATED);
        let created: Value = created.json();
        let id = created["insertedId"].as_str().unwrap_or_default().to_owned();

        let cart: Value = server
            .get("/carts")
            .add_query_param("email", "jane@example.com")
            .await
            .json();
        assert_eq!(cart[0]["email"], "jane@example.com");
        assert_eq!(cart[0]["productId"], "roadster");

        let deleted: Value = server
            .delete(&format!("/carts/{id}"))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(deleted["deletedCount"], 1);
        Ok(())
    }

    #[tokio::test]
    async fn listing_requires_email() -> anyhow::Result<()> {
        let server = create_test_server(create_test_state(false)?)?;

        server
            .get("/carts")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/carts")
            .add_query_param("email", "")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn strangers_cannot_touch_other_carts() -> anyhow::Result<()> {
        let state = create_test_state(false)?;
        seed_user(&state, "root@example.com", UserRole::Admin).await?;
        let server = create_test_server(state.clone())?;
        let mallory = bearer_token(&state, "mallory@example.com")?;

        server
            .post("/carts")
            .authorization_bearer(&mallory)
            .json(&json!({"email": "jane@example.com", "productId": "roadster"}))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let created: Value = server
            .post("/carts")
            .authorization_bearer(bearer_token(&state, "root@example.com")?)
            .json(&json!({"email": "jane@example.com", "productId": "roadster"}))
            .await
            .json();
        let id = created["insertedId"].as_str().unwrap_or_default().to_owned();

        server
            .delete(&format!("/carts/{id}"))
            .authorization_bearer(&mallory)
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .delete("/carts/0190a8f2-7f43-7c4e-9a0b-2f9d0c1e3b4a")
            .authorization_bearer(&mallory)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let cart: Value = server
            .get("/carts")
            .add_query_param("email", "jane@example.com")
            .await
            .json();
        assert_eq!(cart.as_array().map(Vec::len), Some(1));
        Ok(())
    }
}
