//! Liveness greeting.

use axum::Router;
use axum::routing::get;

use crate::service::ServiceState;

/// Text returned by the root route.
const GREETING: &str = "Dealership API is running";

#[tracing::instrument(skip_all)]
async fn greeting() -> &'static str {
    GREETING
}

/// Returns a [`Router`] with the liveness route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/", get(greeting))
}
