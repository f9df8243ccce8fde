//! Category handlers.
//!
//! Reads are always public. Writes are public unless the route policy
//! protects them, in which case they require an administrator.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use dealership_store::SharedStore;
use dealership_store::model::{Document, NewCatalogDocument};
use dealership_store::types::{CatalogKind, InsertOutcome};

use crate::extract::{Json, Path};
use crate::handler::request::CategoryPathParams;
use crate::handler::response::{CatalogRecord, CatalogRecords, Deleted, Inserted, Updated};
use crate::handler::{ErrorKind, Result};
use crate::middleware::{GatePipeline, RouterGateExt};
use crate::service::ServiceState;

/// Tracing target for category operations.
const TRACING_TARGET: &str = "dealership_server::handler::categories";

#[tracing::instrument(skip_all)]
async fn list_categories(
    State(store): State<SharedStore>,
) -> Result<(StatusCode, Json<CatalogRecords>)> {
    let categories = store.list_documents(CatalogKind::Category).await?;
    let categories = categories.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(categories)))
}

#[tracing::instrument(skip_all, fields(category_id = %path_params.category_id))]
async fn read_category(
    State(store): State<SharedStore>,
    Path(path_params): Path<CategoryPathParams>,
) -> Result<(StatusCode, Json<CatalogRecord>)> {
    let Some(category) = store
        .find_document(CatalogKind::Category, path_params.category_id)
        .await?
    else {
        return Err(ErrorKind::NotFound
            .with_message("category not found")
            .with_resource("category"));
    };

    Ok((StatusCode::OK, Json(category.into())))
}

#[tracing::instrument(skip_all)]
async fn create_category(
    State(store): State<SharedStore>,
    Json(mut document): Json<Document>,
) -> Result<(StatusCode, Json<Inserted>)> {
    document.remove("_id");

    let category = store
        .create_document(CatalogKind::Category, NewCatalogDocument::new(document))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        category_id = %category.id,
        "category created"
    );

    Ok((
        StatusCode::CREATED,
        Json(InsertOutcome::new(category.id).into()),
    ))
}

/// Sets the submitted fields on a category, keeping the others.
#[tracing::instrument(skip_all, fields(category_id = %path_params.category_id))]
async fn update_category(
    State(store): State<SharedStore>,
    Path(path_params): Path<CategoryPathParams>,
    Json(mut document): Json<Document>,
) -> Result<(StatusCode, Json<Updated>)> {
    document.remove("_id");

    let outcome = store
        .merge_document(CatalogKind::Category, path_params.category_id, document)
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        matched = outcome.matched_count,
        "category updated"
    );

    Ok((StatusCode::OK, Json(outcome.into())))
}

#[tracing::instrument(skip_all, fields(category_id = %path_params.category_id))]
async fn delete_category(
    State(store): State<SharedStore>,
    Path(path_params): Path<CategoryPathParams>,
) -> Result<(StatusCode, Json<Deleted>)> {
    let outcome = store
        .delete_document(CatalogKind::Category, path_params.category_id)
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        deleted = outcome.deleted_count,
        "category deleted"
    );

    Ok((StatusCode::OK, Json(outcome.into())))
}

/// Returns a [`Router`] with all category routes.
pub fn routes(state: &ServiceState) -> Router<ServiceState> {
    let reads = Router::new()
        .route("/category", get(list_categories))
        .route("/category/{categoryId}", get(read_category));

    let mut writes = Router::new()
        .route("/category", post(create_category))
        .route(
            "/category/{categoryId}",
            put(update_category).delete(delete_category),
        );

    if state.route_policy().protect_categories {
        writes = writes.with_gates(state, GatePipeline::administrator());
    }

    reads.merge(writes)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use dealership_store::types::UserRole;
    use serde_json::{Value, json};

    use crate::handler::test::{bearer_token, create_test_server, create_test_state, seed_user};

    #[tokio::test]
    async fn public_crud_by_default() -> anyhow::Result<()> {
        let server = create_test_server(create_test_state(false)?)?;

        let created = server
            .post("/category")
            .json(&json!({"name": "SUV"}))
            .await;
        created.assert_status(StatusCode::CREATED);
        let created: Value = created.json();
        let id = created["insertedId"].as_str().unwrap_or_default().to_owned();
        let path = format!("/category/{id}");

        server
            .put(&path)
            .json(&json!({"description": "Sport utility"}))
            .await
            .assert_status_ok();

        let category: Value = server.get(&path).await.json();
        assert_eq!(category["_id"], id.as_str());
        assert_eq!(category["name"], "SUV");
        assert_eq!(category["description"], "Sport utility");

        let listed: Value = server.get("/category").await.json();
        assert_eq!(listed.as_array().map(Vec::len), Some(1));

        let deleted: Value = server.delete(&path).await.json();
        assert_eq!(deleted["deletedCount"], 1);

        server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn protected_writes_require_administrator() -> anyhow::Result<()> {
        let state = create_test_state(true)?;
        seed_user(&state, "root@example.com", UserRole::Admin).await?;
        seed_user(&state, "jane@example.com", UserRole::User).await?;
        let server = create_test_server(state.clone())?;
        let body = json!({"name": "Coupe"});

        server
            .post("/category")
            .json(&body)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .post("/category")
            .authorization_bearer(bearer_token(&state, "jane@example.com")?)
            .json(&body)
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .post("/category")
            .authorization_bearer(bearer_token(&state, "root@example.com")?)
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);

        let listed: Value = server.get("/category").await.json();
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server(create_test_state(false)?)?;

        let response = server
            .get("/category/0190a8f2-7f43-7c4e-9a0b-2f9d0c1e3b4a")
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["resource"], "category");
        Ok(())
    }
}
