pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes",
            post(handlers::handle_upload).get(handlers::handle_list),
        )
        .route("/api/v1/resumes/:id", get(handlers::handle_get))
        .route(
            "/api/v1/resumes/:id/career-docs",
            post(handlers::handle_career_doc),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::extraction::upload::UNREADABLE_HINT;
    use crate::test_support::{sample_analysis, FixedExtractor, MemoryResumeStore, StubAnalyzer};

    const BOUNDARY: &str = "resumai-test-boundary";
    const RESUME_LINE: &str =
        "Jane Smith - Staff Engineer - Rust, PostgreSQL, distributed systems, 10 years";

    fn app_with(extractor: FixedExtractor, analyzer: StubAnalyzer) -> Router {
        let state = AppState {
            extractor: Arc::new(extractor),
            analyzer: Arc::new(analyzer),
            store: Arc::new(MemoryResumeStore::default()),
        };
        build_router(state, 1024 * 1024)
    }

    fn app() -> Router {
        app_with(
            FixedExtractor::single_line(RESUME_LINE),
            StubAnalyzer::ok(sample_analysis()),
        )
    }

    fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(user_id: Uuid, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/v1/resumes?user_id={user_id}"))
            .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: String) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn career_doc_request(user_id: Uuid, resume_id: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/v1/resumes/{resume_id}/career-docs?user_id={user_id}"))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), get_request("/health".to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_upload_then_list_and_get() {
        let app = app();
        let user_id = Uuid::new_v4();

        let (status, body) = send(
            &app,
            upload_request(user_id, multipart_body("file", "jane.pdf", b"%PDF-1.7")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["file_name"], "jane.pdf");
        assert_eq!(body["analysis"]["ats_score"], 78.0);
        let id = body["id"].as_str().unwrap().to_string();

        let (status, list) = send(&app, get_request(format!("/api/v1/resumes?user_id={user_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["id"], id.as_str());

        let (status, detail) =
            send(&app, get_request(format!("/api/v1/resumes/{id}?user_id={user_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["resume"]["content"], RESUME_LINE);
        assert_eq!(detail["analysis"]["missing_keywords"], json!(["Kubernetes"]));
    }

    #[tokio::test]
    async fn test_zero_byte_upload_is_rejected() {
        let (status, body) = send(
            &app(),
            upload_request(Uuid::new_v4(), multipart_body("file", "empty.pdf", b"")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "EMPTY_FILE");
    }

    #[tokio::test]
    async fn test_form_without_file_field_is_rejected() {
        let (status, body) = send(
            &app(),
            upload_request(Uuid::new_v4(), multipart_body("avatar", "me.pdf", b"%PDF")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "EMPTY_FILE");
    }

    #[tokio::test]
    async fn test_scanned_upload_returns_hint() {
        let app = app_with(
            FixedExtractor::single_line("~ ~ ..|| ,"),
            StubAnalyzer::ok(sample_analysis()),
        );
        let (status, body) = send(
            &app,
            upload_request(Uuid::new_v4(), multipart_body("file", "scan.pdf", b"%PDF")),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNREADABLE_CONTENT");
        assert_eq!(body["error"]["hint"], UNREADABLE_HINT);
    }

    #[tokio::test]
    async fn test_analysis_failure_is_bad_gateway() {
        let app = app_with(
            FixedExtractor::single_line(RESUME_LINE),
            StubAnalyzer::failing(),
        );
        let user_id = Uuid::new_v4();
        let (status, body) = send(
            &app,
            upload_request(user_id, multipart_body("file", "cv.pdf", b"%PDF")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "ANALYSIS_FAILED");

        let (_, list) = send(&app, get_request(format!("/api/v1/resumes?user_id={user_id}"))).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_other_users_resume_is_not_found() {
        let app = app();
        let owner = Uuid::new_v4();
        let (_, body) = send(
            &app,
            upload_request(owner, multipart_body("file", "cv.pdf", b"%PDF")),
        )
        .await;
        let id = body["id"].as_str().unwrap().to_string();

        let stranger = Uuid::new_v4();
        let (status, body) =
            send(&app, get_request(format!("/api/v1/resumes/{id}?user_id={stranger}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_interview_prep_for_stored_resume() {
        let reply = r#"{"questions": [{"question": "Tell me about Rust.", "answer": "Ownership."}]}"#;
        let app = app_with(
            FixedExtractor::single_line(RESUME_LINE),
            StubAnalyzer::ok(sample_analysis()).with_reply(reply),
        );
        let user_id = Uuid::new_v4();
        let (_, body) = send(
            &app,
            upload_request(user_id, multipart_body("file", "cv.pdf", b"%PDF")),
        )
        .await;
        let id = body["id"].as_str().unwrap().to_string();

        let (status, doc) = send(
            &app,
            career_doc_request(
                user_id,
                &id,
                json!({"job_description": "Senior Rust engineer", "kind": "interview_prep"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["kind"], "interview_prep");
        assert_eq!(doc["questions"][0]["answer"], "Ownership.");
    }

    #[tokio::test]
    async fn test_career_doc_requires_job_description() {
        let (status, body) = send(
            &app(),
            career_doc_request(
                Uuid::new_v4(),
                &Uuid::new_v4().to_string(),
                json!({"job_description": "  ", "kind": "cover_letter"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
