//! Axum router construction.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    let timeout = state.request_timeout;
    Router::new()
        .route("/health", get(handlers::health))
        .route("/identifiers/validate", post(handlers::validate_identifier))
        .route("/identifiers/check-digit", post(handlers::check_digit))
        .route("/fields/encrypt", post(handlers::encrypt_field))
        .route("/fields/decrypt", post(handlers::decrypt_field))
        .route(
            "/records",
            get(handlers::list_records).post(handlers::create_record),
        )
        .route(
            "/records/:index",
            put(handlers::update_record).delete(handlers::delete_record),
        )
        .route("/export", get(handlers::export_ledger))
        .route("/import", post(handlers::import_ledger))
        .route("/keys/export", post(handlers::export_key))
        .route("/keys/import", post(handlers::import_key))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use axum_test::TestServer;
    use common::protocol::{AppendResponse, KeyExport, RecordPage, ValidateResponse};
    use serde_json::json;
    use tower::ServiceExt;

    fn submission(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "dob": "1990-01-01",
            "nationalId": "234123412346",
            "key": "session key",
            "custom": [{"key": "city", "value": "Pune"}, {"key": "", "value": ""}],
            "status": "Pending"
        })
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = build(AppState::default());
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn health_route_exists() {
        let app = build(AppState::default());
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn validate_route() {
        let server = TestServer::new(build(AppState::default())).unwrap();
        let ok: ValidateResponse = server
            .post("/identifiers/validate")
            .json(&json!({"identifier": "234123412346"}))
            .await
            .json();
        assert!(ok.valid);
        let bad: ValidateResponse = server
            .post("/identifiers/validate")
            .json(&json!({"identifier": "2341-2341-2346"}))
            .await
            .json();
        assert!(!bad.valid);
    }

    #[tokio::test]
    async fn field_encrypt_then_decrypt() {
        let server = TestServer::new(build(AppState::default())).unwrap();
        let enc: serde_json::Value = server
            .post("/fields/encrypt")
            .json(&json!({"plaintext": "hello", "key": "k"}))
            .await
            .json();
        let ct = enc["ciphertext"].as_str().unwrap().to_owned();
        let dec: serde_json::Value = server
            .post("/fields/decrypt")
            .json(&json!({"ciphertext": ct, "key": "k"}))
            .await
            .json();
        assert_eq!(dec["plaintext"], "hello");
    }

    #[tokio::test]
    async fn record_workflow_end_to_end() {
        let server = TestServer::new(build(AppState::default())).unwrap();

        let a = server.post("/records").json(&submission("John")).await;
        assert_eq!(a.status_code(), StatusCode::CREATED);
        assert_eq!(a.json::<AppendResponse>().index, 0);
        let b: AppendResponse = server.post("/records").json(&submission("Amy")).await.json();
        assert_eq!(b.index, 1);

        // Search by name, case-insensitively.
        let page: RecordPage = server
            .get("/records")
            .add_query_param("q", "JO")
            .await
            .json();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].index, 0);
        assert_eq!(page.items[0].record.name, "John");
        assert_ne!(page.items[0].record.aadhar, "234123412346");

        // Edit in place.
        let resp = server.put("/records/1").json(&submission("Amelia")).await;
        assert_eq!(resp.status_code(), StatusCode::NO_CONTENT);

        // Export, delete everything, import back.
        let exported = server.get("/export").await.text();
        assert!(!exported.contains("234123412346"));
        server.delete("/records/0").await;
        server.delete("/records/0").await;
        let empty: RecordPage = server.get("/records").add_query_param("q", "").await.json();
        assert!(empty.items.is_empty());

        let resp = server.post("/import").text(exported.clone()).await;
        assert_eq!(resp.status_code(), StatusCode::NO_CONTENT);
        assert_eq!(server.get("/export").await.text(), exported);

        let page: RecordPage = server.get("/records").await.json();
        let names: Vec<&str> = page.items.iter().map(|i| i.record.name.as_str()).collect();
        assert_eq!(names, vec!["John", "Amelia"]);
    }

    #[tokio::test]
    async fn invalid_identifier_is_rejected_without_state_change() {
        let server = TestServer::new(build(AppState::default())).unwrap();
        let mut sub = submission("John");
        sub["nationalId"] = json!("234123412345");
        let resp = server.post("/records").json(&sub).expect_failure().await;
        assert_eq!(resp.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let page: RecordPage = server.get("/records").await.json();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn empty_required_fields_are_rejected_and_export_reimports() {
        let server = TestServer::new(build(AppState::default())).unwrap();
        server.post("/records").json(&submission("John")).await;

        let mut blank = submission("Blank");
        blank["name"] = json!("");
        blank["email"] = json!("");
        blank["dob"] = json!("");
        let resp = server.post("/records").json(&blank).expect_failure().await;
        assert_eq!(resp.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(resp.json::<serde_json::Value>()["code"], "validation_failure");

        let resp = server.put("/records/0").json(&blank).expect_failure().await;
        assert_eq!(resp.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let mut unlabelled = submission("Amy");
        unlabelled["gender"] = json!("");
        server.post("/records").json(&unlabelled).await;

        // Everything the ledger accepted comes back through import unchanged.
        let exported = server.get("/export").await.text();
        let resp = server.post("/import").text(exported.clone()).await;
        assert_eq!(resp.status_code(), StatusCode::NO_CONTENT);
        assert_eq!(server.get("/export").await.text(), exported);

        let page: RecordPage = server.get("/records").await.json();
        let names: Vec<&str> = page.items.iter().map(|i| i.record.name.as_str()).collect();
        assert_eq!(names, vec!["John", "Amy"]);
        assert_eq!(page.items[1].record.gender, "unspecified");
    }

    #[tokio::test]
    async fn malformed_input_gets_bad_request_body() {
        let server = TestServer::new(build(AppState::default())).unwrap();

        let resp = server
            .post("/records")
            .text("{\"name\": ")
            .content_type("application/json")
            .expect_failure()
            .await;
        assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<serde_json::Value>()["code"], "bad_request");

        let resp = server.delete("/records/abc").expect_failure().await;
        assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<serde_json::Value>()["code"], "bad_request");

        let resp = server
            .get("/records")
            .add_query_param("page", "first")
            .expect_failure()
            .await;
        assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<serde_json::Value>()["code"], "bad_request");
    }

    #[tokio::test]
    async fn out_of_range_index_returns_404() {
        let server = TestServer::new(build(AppState::default())).unwrap();
        let resp = server.delete("/records/3").expect_failure().await;
        assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = resp.json();
        assert_eq!(body["code"], "out_of_range");

        let resp = server
            .put("/records/0")
            .json(&submission("Nobody"))
            .expect_failure()
            .await;
        assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_import_keeps_ledger() {
        let server = TestServer::new(build(AppState::default())).unwrap();
        server.post("/records").json(&submission("Keep")).await;
        let bad = r#"[{"name":"X","dob":"d","aadhar":"a","metadata":"{}"}]"#;
        let resp = server.post("/import").text(bad).expect_failure().await;
        assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
        let page: RecordPage = server.get("/records").await.json();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].record.name, "Keep");
    }

    #[tokio::test]
    async fn key_export_and_import() {
        let server = TestServer::new(build(AppState::default())).unwrap();
        let text = server
            .post("/keys/export")
            .json(&json!({"key": "my passphrase"}))
            .await
            .text();
        let key: KeyExport = server.post("/keys/import").text(text).await.json();
        assert_eq!(key.encryption_key, "my passphrase");

        let resp = server
            .post("/keys/import")
            .text(r#"{"encryptionKey":""}"#)
            .expect_failure()
            .await;
        assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    }
}
