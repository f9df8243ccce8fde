//! Support ticket handlers.
//!
//! Every route requires a verified caller. Listing is scoped to the caller's
//! own tickets unless they are an administrator, and updates or deletions
//! check that the ticket exists before checking ownership.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, put};
use dealership_store::SharedStore;
use dealership_store::model::NewSupportTicket;
use dealership_store::types::InsertOutcome;
use uuid::Uuid;

use crate::extract::{Caller, Json, Path, Query};
use crate::handler::request::{CreateTicket, TicketPathParams, TicketQuery, UpdateTicket};
use crate::handler::response::{Deleted, Inserted, TicketRecords, Updated};
use crate::handler::{Error, ErrorKind, Result};
use crate::middleware::{GatePipeline, RouterGateExt};
use crate::service::ServiceState;

/// Tracing target for support ticket operations.
const TRACING_TARGET: &str = "dealership_server::handler::tickets";

fn ticket_not_found(ticket_id: Uuid) -> Error<'static> {
    ErrorKind::NotFound
        .with_message(format!("support ticket {ticket_id} not found"))
        .with_resource("support_ticket")
}

/// Lists the tickets visible to the caller.
#[tracing::instrument(skip_all, fields(caller = %caller.email))]
async fn list_tickets(
    State(store): State<SharedStore>,
    caller: Caller,
    Query(query): Query<TicketQuery>,
) -> Result<(StatusCode, Json<TicketRecords>)> {
    let scope = caller.listing_scope(query.email);
    let tickets = store.list_tickets(scope.as_deref()).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        scoped = scope.is_some(),
        count = tickets.len(),
        "support tickets listed"
    );

    let tickets = tickets.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(tickets)))
}

#[tracing::instrument(skip_all, fields(caller = %caller.email))]
async fn create_ticket(
    State(store): State<SharedStore>,
    caller: Caller,
    Json(request): Json<CreateTicket>,
) -> Result<(StatusCode, Json<Inserted>)> {
    let owner = caller.resolve_owner(request.email)?;

    let mut content = request.content;
    content.remove("_id");

    let mut new_ticket = NewSupportTicket::new(owner, content);
    if let Some(status) = request.status {
        new_ticket = new_ticket.with_status(status);
    }

    let ticket = store.create_ticket(new_ticket).await?;

    tracing::info!(
        target: TRACING_TARGET,
        ticket_id = %ticket.id,
        "support ticket created"
    );

    Ok((StatusCode::CREATED, Json(InsertOutcome::new(ticket.id).into())))
}

#[tracing::instrument(skip_all, fields(caller = %caller.email, ticket_id = %path_params.ticket_id))]
async fn update_ticket(
    State(store): State<SharedStore>,
    caller: Caller,
    Path(path_params): Path<TicketPathParams>,
    Json(request): Json<UpdateTicket>,
) -> Result<(StatusCode, Json<Updated>)> {
    let Some(ticket) = store.find_ticket(path_params.ticket_id).await? else {
        return Err(ticket_not_found(path_params.ticket_id));
    };

    caller.authorize(&ticket)?;

    let outcome = store
        .update_ticket(ticket.id, request.into_changes())
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        matched = outcome.matched_count,
        "support ticket updated"
    );

    Ok((StatusCode::OK, Json(outcome.into())))
}

#[tracing::instrument(skip_all, fields(caller = %caller.email, ticket_id = %path_params.ticket_id))]
async fn delete_ticket(
    State(store): State<SharedStore>,
    caller: Caller,
    Path(path_params): Path<TicketPathParams>,
) -> Result<(StatusCode, Json<Deleted>)> {
    let Some(ticket) = store.find_ticket(path_params.ticket_id).await? else {
        return Err(ticket_not_found(path_params.ticket_id));
    };

    caller.authorize(&ticket)?;

    let outcome = store.delete_ticket(ticket.id).await?;

    tracing::info!(
        target: TRACING_TARGET,
        deleted = outcome.deleted_count,
        "support ticket deleted"
    );

    Ok((StatusCode::OK, Json(outcome.into())))
}

/// Lists every ticket regardless of owner.
#[tracing::instrument(skip_all)]
async fn list_all_tickets(
    State(store): State<SharedStore>,
) -> Result<(StatusCode, Json<TicketRecords>)> {
    let tickets = store.list_tickets(None).await?;
    let tickets = tickets.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(tickets)))
}

/// Returns a [`Router`] with all support ticket routes.
pub fn routes(state: &ServiceState) -> Router<ServiceState> {
    let authenticated = Router::new()
        .route("/supportTickets", get(list_tickets).post(create_ticket))
        .route(
            "/supportTickets/{ticketId}",
            put(update_ticket).delete(delete_ticket),
        )
        .with_gates(state, GatePipeline::authenticated());

    let administrator = Router::new()
        .route("/tickets", get(list_all_tickets))
        .with_gates(state, GatePipeline::administrator());

    authenticated.merge(administrator)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use dealership_store::types::UserRole;
    use serde_json::{Value, json};

    use crate::handler::test::{bearer_token, create_test_server, create_test_state, seed_user};
    use crate::service::ServiceState;

    async fn open_ticket(
        server: &TestServer,
        state: &ServiceState,
        email: &str,
    ) -> anyhow::Result<String> {
        let response = server
            .post("/supportTickets")
            .authorization_bearer(bearer_token(state, email)?)
            .json(&json!({"subject": "Brake noise"}))
            .await;
        response.assert_status(StatusCode::CREATED);

        let created: Value = response.json();
        Ok(created["insertedId"].as_str().unwrap_or_default().to_owned())
    }

    #[tokio::test]
    async fn owner_and_administrator_delete_flow() -> anyhow::Result<()> {
        let state = create_test_state(false)?;
        seed_user(&state, "jane@example.com", UserRole::User).await?;
        seed_user(&state, "mallory@example.com", UserRole::User).await?;
        seed_user(&state, "root@example.com", UserRole::Admin).await?;
        let server = create_test_server(state.clone())?;
        let jane = bearer_token(&state, "jane@example.com")?;

        let id = open_ticket(&server, &state, "jane@example.com").await?;
        let path = format!("/supportTickets/{id}");

        server
            .delete(&path)
            .authorization_bearer(bearer_token(&state, "mallory@example.com")?)
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let listed: Value = server
            .get("/supportTickets")
            .authorization_bearer(&jane)
            .await
            .json();
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
        assert_eq!(listed[0]["status"], "open");
        assert_eq!(listed[0]["subject"], "Brake noise");

        let deleted: Value = server
            .delete(&path)
            .authorization_bearer(bearer_token(&state, "root@example.com")?)
            .await
            .json();
        assert_eq!(deleted["deletedCount"], 1);

        let listed: Value = server
            .get("/supportTickets")
            .authorization_bearer(&jane)
            .await
            .json();
        assert_eq!(listed, json!([]));
        Ok(())
    }

    #[tokio::test]
    async fn listing_is_scoped_to_caller() -> anyhow::Result<()> {
        let state = create_test_state(false)?;
        seed_user(&state, "root@example.com", UserRole::Admin).await?;
        let server = create_test_server(state.clone())?;

        open_ticket(&server, &state, "jane@example.com").await?;
        open_ticket(&server, &state, "mallory@example.com").await?;

        let scoped: Value = server
            .get("/supportTickets")
            .add_query_param("email", "jane@example.com")
            .authorization_bearer(bearer_token(&state, "mallory@example.com")?)
            .await
            .json();
        assert_eq!(scoped.as_array().map(Vec::len), Some(1));
        assert_eq!(scoped[0]["email"], "mallory@example.com");

        let root = bearer_token(&state, "root@example.com")?;
        let all: Value = server
            .get("/supportTickets")
            .authorization_bearer(&root)
            .await
            .json();
        assert_eq!(all.as_array().map(Vec::len), Some(2));

        let filtered: Value = server
            .get("/supportTickets")
            .add_query_param("email", "jane@example.com")
            .authorization_bearer(&root)
            .await
            .json();
        assert_eq!(filtered.as_array().map(Vec::len), Some(1));
        assert_eq!(filtered[0]["email"], "jane@example.com");
        Ok(())
    }

    #[tokio::test]
    async fn creation_on_behalf_requires_administrator() -> anyhow::Result<()> {
        let state = create_test_state(false)?;
        seed_user(&state, "root@example.com", UserRole::Admin).await?;
        let server = create_test_server(state.clone())?;
        let body = json!({"email": "jane@example.com", "subject": "Recall"});

        server
            .post("/supportTickets")
            .authorization_bearer(bearer_token(&state, "mallory@example.com")?)
            .json(&body)
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .post("/supportTickets")
            .authorization_bearer(bearer_token(&state, "mallory@example.com")?)
            .json(&json!({"email": "", "subject": "Recall"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .post("/supportTickets")
            .authorization_bearer(bearer_token(&state, "root@example.com")?)
            .json(&json!({"email": "jane@example.com", "status": "pending", "subject": "Recall"}))
            .await;
        response.assert_status(StatusCode::CREATED);

        let tickets = state.store().list_tickets(Some("jane@example.com")).await?;
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].status, "pending");
        Ok(())
    }

    #[tokio::test]
    async fn update_checks_existence_then_ownership() -> anyhow::Result<()> {
        let state = create_test_state(false)?;
        let server = create_test_server(state.clone())?;
        let id = open_ticket(&server, &state, "jane@example.com").await?;
        let mallory = bearer_token(&state, "mallory@example.com")?;

        server
            .put("/supportTickets/0190a8f2-7f43-7c4e-9a0b-2f9d0c1e3b4a")
            .authorization_bearer(&mallory)
            .json(&json!({"status": "closed"}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .put(&format!("/supportTickets/{id}"))
            .authorization_bearer(&mallory)
            .json(&json!({"status": "closed"}))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let updated: Value = server
            .put(&format!("/supportTickets/{id}"))
            .authorization_bearer(bearer_token(&state, "jane@example.com")?)
            .json(&json!({"status": "closed", "resolution": "pads replaced"}))
            .await
            .json();
        assert_eq!(updated["modifiedCount"], 1);

        let tickets = state.store().list_tickets(None).await?;
        assert_eq!(tickets[0].status, "closed");
        assert_eq!(tickets[0].content["resolution"], "pads replaced");
        assert_eq!(tickets[0].content["subject"], "Brake noise");
        Ok(())
    }

    #[tokio::test]
    async fn full_listing_is_for_administrators() -> anyhow::Result<()> {
        let state = create_test_state(false)?;
        seed_user(&state, "root@example.com", UserRole::Admin).await?;
        let server = create_test_server(state.clone())?;
        open_ticket(&server, &state, "jane@example.com").await?;

        server
            .get("/tickets")
            .authorization_bearer(bearer_token(&state, "jane@example.com")?)
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let all: Value = server
            .get("/tickets")
            .authorization_bearer(bearer_token(&state, "root@example.com")?)
            .await
            .json();
        assert_eq!(all.as_array().map(Vec::len), Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn every_route_requires_token() -> anyhow::Result<()> {
        let server = create_test_server(create_test_state(false)?)?;

        let response = server.get("/supportTickets").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["message"], "unauthorized access");
        Ok(())
    }
}
