//! Read-only product and shop item listings.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use dealership_store::SharedStore;
use dealership_store::types::CatalogKind;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::CatalogRecords;
use crate::service::ServiceState;

async fn list_catalog(store: &SharedStore, kind: CatalogKind) -> Result<CatalogRecords> {
    let documents = store.list_documents(kind).await?;
    Ok(documents.into_iter().map(Into::into).collect())
}

#[tracing::instrument(skip_all)]
async fn list_products(
    State(store): State<SharedStore>,
) -> Result<(StatusCode, Json<CatalogRecords>)> {
    let products = list_catalog(&store, CatalogKind::Product).await?;
    Ok((StatusCode::OK, Json(products)))
}

#[tracing::instrument(skip_all)]
async fn list_shop_items(
    State(store): State<SharedStore>,
) -> Result<(StatusCode, Json<CatalogRecords>)> {
    let shop_items = list_catalog(&store, CatalogKind::ShopItem).await?;
    Ok((StatusCode::OK, Json(shop_items)))
}

/// Returns a [`Router`] with the catalog listings.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/shopItems", get(list_shop_items))
}
