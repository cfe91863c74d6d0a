pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::grading::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Grading API
        .route("/upload", post(handlers::handle_upload))
        .route("/api/v1/grade/text", post(handlers::handle_grade_text))
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;

    const BOUNDARY: &str = "grader-test-boundary";

    fn router() -> Router {
        build_router(AppState::new(Config::default()))
    }

    fn multipart_body(filename: Option<&str>, bytes: &[u8], role: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(filename) = filename {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(role) = role {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"role_type\"\r\n\r\n{role}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_upload_plain_text_resume() {
        let resume = b"Jane Doe\njane.doe@example.com | 415-555-0100\nExperience\n- Developed Python and Docker tooling, 2015 - 2021\n";
        let body = multipart_body(Some("resume.txt"), resume, Some("developer"));
        let (status, json) = send(router(), upload_request(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["role_type"], "developer");
        assert_eq!(json["scoring_mode"], "weighted");
        assert_eq!(json["parsed_data"]["contact_info"]["email"], "jane.doe@example.com");
        assert_eq!(json["parsed_data"]["experience_years"], 6);
        let total = json["total_score"].as_u64().unwrap();
        assert!(total <= 100);
        assert!(json["section_scores"]["contact_info"].is_u64());
    }

    #[tokio::test]
    async fn test_upload_unknown_role_falls_back_to_general() {
        let body = multipart_body(Some("cv.txt"), b"Skills: leadership", Some("astronaut"));
        let (status, json) = send(router(), upload_request(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["role_type"], "general");
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_format() {
        let body = multipart_body(Some("setup.exe"), b"MZ\x90\x00", None);
        let (status, json) = send(router(), upload_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_upload_without_file_is_validation_error() {
        let body = multipart_body(None, b"", Some("developer"));
        let (status, json) = send(router(), upload_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], "No file uploaded");
    }

    #[tokio::test]
    async fn test_upload_empty_filename_is_validation_error() {
        let body = multipart_body(Some(""), b"text", None);
        let (status, json) = send(router(), upload_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], "No file selected");
    }

    #[tokio::test]
    async fn test_upload_whitespace_file_is_empty_content() {
        let body = multipart_body(Some("blank.txt"), b"   \n\n", None);
        let (status, json) = send(router(), upload_request(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "EMPTY_CONTENT");
    }

    #[tokio::test]
    async fn test_upload_corrupt_docx_is_extraction_failure() {
        let body = multipart_body(Some("resume.docx"), b"definitely not a zip", None);
        let (status, json) = send(router(), upload_request(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_rejected() {
        let config = Config {
            max_upload_bytes: 64,
            ..Config::default()
        };
        let app = build_router(AppState::new(config));
        let big = vec![b'a'; 4096];
        let body = multipart_body(Some("big.txt"), &big, None);
        let (status, _) = send(app, upload_request(body)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_grade_text_endpoint() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/grade/text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"text": "python, react, docker", "role_type": "developer"}"#,
            ))
            .unwrap();
        let (status, json) = send(router(), request).await;
        assert_eq!(status, StatusCode::OK);
        let mut skills: Vec<String> =
            serde_json::from_value(json["parsed_data"]["skills"].clone()).unwrap();
        skills.sort();
        assert_eq!(skills, vec!["docker", "python", "react"]);
    }

    #[tokio::test]
    async fn test_grade_text_empty_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/grade/text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "  "}"#))
            .unwrap();
        let (status, json) = send(router(), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "EMPTY_CONTENT");
    }
}
