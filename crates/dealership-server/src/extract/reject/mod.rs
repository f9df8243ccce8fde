//! Request extractors whose rejections use the standard error body.

mod json;
mod path;
mod query;

pub use self::json::Json;
pub use self::path::Path;
pub use self::query::Query;

/// Keeps rejection details short enough to return to clients.
fn sanitize_error_message(message: &str) -> String {
    message
        .lines()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(200)
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Filter {
        email: String,
    }

    async fn echo_json(Json(body): Json<Value>) -> Json<Value> {
        Json(body)
    }

    async fn echo_id(Path(id): Path<Uuid>) -> String {
        id.to_string()
    }

    async fn echo_filter(Query(filter): Query<Filter>) -> String {
        filter.email
    }

    fn server() -> anyhow::Result<TestServer> {
        let app = Router::new()
            .route("/json", post(echo_json))
            .route("/ids/{id}", get(echo_id))
            .route("/filter", get(echo_filter));
        Ok(TestServer::new(app)?)
    }

    #[test]
    fn long_messages_are_truncated() {
        let message = "x".repeat(500);
        assert_eq!(sanitize_error_message(&message).len(), 200);
        assert_eq!(sanitize_error_message("a\nb\nc"), "a b");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() -> anyhow::Result<()> {
        let server = server()?;

        let response = server
            .post("/json")
            .content_type("application/json")
            .text("{not json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["name"], "bad_request");

        let response = server.post("/json").json(&json!({"a": 1})).await;
        response.assert_status_ok();
        Ok(())
    }

    #[tokio::test]
    async fn malformed_path_id_is_bad_request() -> anyhow::Result<()> {
        let server = server()?;

        server
            .get("/ids/not-a-uuid")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let id = Uuid::now_v7();
        server
            .get(&format!("/ids/{id}"))
            .await
            .assert_text(id.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn missing_query_field_is_bad_request() -> anyhow::Result<()> {
        let server = server()?;

        server
            .get("/filter")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/filter")
            .add_query_param("email", "jane@example.com")
            .await
            .assert_text("jane@example.com");
        Ok(())
    }
}
