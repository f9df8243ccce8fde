//! User directory handlers.
//!
//! Registration and lookup are public. Profile updates require a verified
//! caller acting on their own record, and role changes or deletions require
//! an administrator.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use dealership_store::SharedStore;
use dealership_store::types::InsertOutcome;

use crate::extract::{Caller, Json, Path};
use crate::handler::request::{
    CreateUser, UpdateProfile, UpdateRole, UserEmailPathParams, UserIdPathParams,
};
use crate::handler::response::{Deleted, Registration, Updated, UserRecord};
use crate::handler::{ErrorKind, Result};
use crate::middleware::{GatePipeline, RouterGateExt};
use crate::service::ServiceState;

/// Tracing target for user operations.
const TRACING_TARGET: &str = "dealership_server::handler::users";

/// Returns the user registered under an email, or `null`.
#[tracing::instrument(skip_all)]
async fn read_user(
    State(store): State<SharedStore>,
    Path(path_params): Path<UserEmailPathParams>,
) -> Result<(StatusCode, Json<Option<UserRecord>>)> {
    let user = store.find_user_by_email(&path_params.email).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        found = user.is_some(),
        "user lookup"
    );

    Ok((StatusCode::OK, Json(user.map(Into::into))))
}

/// Registers a user unless the email is already taken.
#[tracing::instrument(skip_all)]
async fn create_user(
    State(store): State<SharedStore>,
    Json(request): Json<CreateUser>,
) -> Result<(StatusCode, Json<Registration>)> {
    if request.email().is_empty() {
        return Err(ErrorKind::BadRequest.with_message("email is required"));
    }

    if store.find_user_by_email(request.email()).await?.is_some() {
        tracing::debug!(target: TRACING_TARGET, "user already exists");
        return Ok((StatusCode::OK, Json(Registration::existing())));
    }

    let user = match store.create_user(request.into_model()).await {
        Ok(user) => user,
        // Lost a race against a concurrent registration of the same email.
        Err(error) if error.is_unique_violation() => {
            return Ok((StatusCode::OK, Json(Registration::existing())));
        }
        Err(error) => return Err(error.into()),
    };

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        "user registered"
    );

    let inserted = InsertOutcome::new(user.id).into();
    Ok((StatusCode::CREATED, Json(Registration::Created(inserted))))
}

/// Merges profile fields into the caller's own record.
#[tracing::instrument(skip_all, fields(caller = %caller.email))]
async fn update_profile(
    State(store): State<SharedStore>,
    caller: Caller,
    Path(path_params): Path<UserEmailPathParams>,
    Json(request): Json<UpdateProfile>,
) -> Result<(StatusCode, Json<Updated>)> {
    if !caller.can_act(&path_params.email) {
        return Err(ErrorKind::Forbidden.with_resource("user"));
    }

    let outcome = store
        .merge_user_profile(&path_params.email, request.into_fields())
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        matched = outcome.matched_count,
        "user profile updated"
    );

    Ok((StatusCode::OK, Json(outcome.into())))
}

/// Changes the role of a user.
#[tracing::instrument(skip_all, fields(user_id = %path_params.user_id))]
async fn update_role(
    State(store): State<SharedStore>,
    Path(path_params): Path<UserIdPathParams>,
    Json(request): Json<UpdateRole>,
) -> Result<(StatusCode, Json<Updated>)> {
    let outcome = store
        .update_user_role(path_params.user_id, request.role)
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        role = %request.role,
        matched = outcome.matched_count,
        "user role updated"
    );

    Ok((StatusCode::OK, Json(outcome.into())))
}

/// Permanently deletes a user.
#[tracing::instrument(skip_all, fields(user_id = %path_params.user_id))]
async fn delete_user(
    State(store): State<SharedStore>,
    Path(path_params): Path<UserIdPathParams>,
) -> Result<(StatusCode, Json<Deleted>)> {
    let outcome = store.delete_user(path_params.user_id).await?;

    tracing::warn!(
        target: TRACING_TARGET,
        deleted = outcome.deleted_count,
        "user deleted"
    );

    Ok((StatusCode::OK, Json(outcome.into())))
}

/// Returns a [`Router`] with all user routes.
///
/// The `{user}` segment is an email for reads and profile updates and an
/// identifier for role changes and deletions.
pub fn routes(state: &ServiceState) -> Router<ServiceState> {
    let public = Router::new()
        .route("/users/{user}", get(read_user))
        .route("/createUser", post(create_user));

    let authenticated = Router::new()
        .route("/users/{user}", put(update_profile))
        .with_gates(state, GatePipeline::authenticated());

    let administrator = Router::new()
        .route("/users/{user}", patch(update_role).delete(delete_user))
        .with_gates(state, GatePipeline::administrator());

    public.merge(authenticated).merge(administrator)
}
