pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/pdf/generate", get(handlers::handle_generate_document))
        .route("/api/v1/worksheets", post(handlers::handle_create_worksheet))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::layout::default_page_config;

    fn router() -> Router {
        build_router(AppState {
            config: Config::default(),
            page_config: default_page_config(),
        })
    }

    async fn get_uri(uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, body.to_vec())
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    // ── health ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = get_uri("/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "worksheets");
    }

    // ── GET /api/pdf/generate ───────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_pdf_document() {
        let (status, content_type, body) =
            get_uri("/api/pdf/generate?limit=20&numberOfExercises=40&iterations=2&seed=7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/pdf"));
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_generate_text_document_with_operations() {
        let (status, content_type, body) = get_uri(
            "/api/pdf/generate?limit=20&numberOfExercises=30&operations=addition&seed=1&format=text",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/plain"));
        let text = String::from_utf8(body).unwrap();
        assert_eq!(text.lines().count(), 30);
        assert!(text.lines().all(|line| line.contains(" + ")));
    }

    #[tokio::test]
    async fn test_same_seed_same_text_document() {
        let uri = "/api/pdf/generate?limit=50&numberOfExercises=60&seed=99&format=text";
        let (_, _, first) = get_uri(uri).await;
        let (_, _, second) = get_uri(uri).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_generate_rejects_small_limit() {
        let (status, _, body) = get_uri("/api/pdf/generate?limit=5&numberOfExercises=10").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_rejects_negative_input_as_json() {
        for uri in [
            "/api/pdf/generate?limit=-5&numberOfExercises=10",
            "/api/pdf/generate?limit=20&numberOfExercises=-1",
            "/api/pdf/generate?limit=20&numberOfExercises=10&iterations=-1",
        ] {
            let (status, _, body) = get_uri(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            let json: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["error"]["code"], "VALIDATION_ERROR", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_oversized_requests() {
        for uri in [
            "/api/pdf/generate?limit=20&numberOfExercises=4000000000",
            "/api/pdf/generate?limit=20&numberOfExercises=10&iterations=1000",
        ] {
            let (status, _, body) = get_uri(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            let json: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["error"]["code"], "VALIDATION_ERROR", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_unknown_operation() {
        let (status, _, body) =
            get_uri("/api/pdf/generate?limit=20&numberOfExercises=10&operations=FOO").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"]["message"].as_str().unwrap().contains("FOO"));
    }

    #[tokio::test]
    async fn test_generate_rejects_zero_iterations() {
        let (status, _, _) =
            get_uri("/api/pdf/generate?limit=20&numberOfExercises=10&iterations=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ── POST /api/v1/worksheets ─────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_worksheet_json() {
        let (status, json) = post_json(
            "/api/v1/worksheets",
            serde_json::json!({
                "limit": 20,
                "count": 120,
                "operations": ["ADDITION"],
                "seed": 3
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["equations"].as_array().unwrap().len(), 120);
        let sizes: Vec<usize> = json["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["lines"].as_array().unwrap().len())
            .collect();
        assert_eq!(sizes, vec![50, 50, 20]);
        assert!(json["equations"]
            .as_array()
            .unwrap()
            .iter()
            .all(|eq| eq["operation"] == "ADDITION"));
    }

    #[tokio::test]
    async fn test_create_worksheet_null_operations_default() {
        let (status, json) = post_json(
            "/api/v1/worksheets",
            serde_json::json!({
                "limit": 10,
                "count": 50,
                "operations": [null],
                "column_capacity": 25
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["columns"].as_array().unwrap().len(), 2);
        assert!(json["equations"].as_array().unwrap().iter().all(|eq| {
            eq["operation"] == "ADDITION" || eq["operation"] == "SUBTRACTION"
        }));
    }

    #[tokio::test]
    async fn test_create_worksheet_rejects_zero_count() {
        let (status, json) = post_json(
            "/api/v1/worksheets",
            serde_json::json!({ "limit": 20, "count": 0 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_worksheet_rejects_negative_values() {
        let (status, json) = post_json(
            "/api/v1/worksheets",
            serde_json::json!({ "limit": 20, "count": -1 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(json["error"]["message"].as_str().unwrap().contains("-1"));

        let (status, json) = post_json(
            "/api/v1/worksheets",
            serde_json::json!({ "limit": -5, "count": 10 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]["message"].as_str().unwrap().contains("-5"));
    }
}
