//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Every module contributes its own router. Routes that need a verified
//! caller are wrapped with a [`GatePipeline`] before they are merged, so
//! public and gated methods may share a path.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use dealership_server::handler::routes;
//! use dealership_server::service::{ServiceConfig, ServiceState, TokenConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::builder()
//!     .with_token_config(TokenConfig::new("secret"))
//!     .with_in_memory(true)
//!     .build()?;
//! let state = ServiceState::from_config(&config).await?;
//!
//! let app: axum::Router = routes(state.clone()).with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler
//! [`GatePipeline`]: crate::middleware::GatePipeline

mod carts;
mod catalog;
mod categories;
mod error;
mod monitors;
pub mod request;
pub mod response;
mod tickets;
mod tokens;
mod users;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with every route of the API.
///
/// Unknown paths fall through to a `404 Not Found` error body.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(monitors::routes())
        .merge(tokens::routes())
        .merge(users::routes(&state))
        .merge(categories::routes(&state))
        .merge(catalog::routes())
        .merge(carts::routes(&state))
        .merge(tickets::routes(&state))
        .fallback(handler)
}
