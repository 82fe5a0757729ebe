pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers::{self as resumes, MAX_FILES_PER_BATCH};
use crate::scoring::handlers as scoring;
use crate::state::AppState;

/// Multipart framing allowance on top of the raw file bytes.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state
        .config
        .max_upload_bytes
        .saturating_mul(MAX_FILES_PER_BATCH)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        // Resumes
        .route(
            "/api/resumes",
            post(resumes::handle_upload)
                .layer(DefaultBodyLimit::max(upload_limit))
                .get(resumes::handle_list_resumes),
        )
        .route("/api/resumes/:id", get(resumes::handle_get_resume))
        // Ask
        .route("/api/ask", post(scoring::handle_ask))
        // Jobs
        .route("/api/jobs", post(scoring::handle_create_job))
        .route("/api/jobs/:id", get(scoring::handle_get_job))
        .route("/api/jobs/:id/match", post(scoring::handle_match_job))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::Catalog;
    use crate::config::{Config, DEFAULT_MAX_UPLOAD_BYTES};
    use crate::store::InMemoryStore;

    const BOUNDARY: &str = "ranker-test-boundary";

    fn test_router() -> Router {
        build_router(AppState {
            store: Arc::new(InMemoryStore::new()),
            catalog: Arc::new(Catalog::default()),
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                catalog_path: None,
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }

    fn multipart_body(files: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, content) in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resumes\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn upload_request(files: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/resumes")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(files)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let router = test_router();
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_mixed_upload_batch_succeeds() {
        let router = test_router();
        let (status, body) = send(
            &router,
            upload_request(&[
                ("grace.txt", "Grace Hopper\ngrace@x.com\nPython and Docker"),
                ("tool.exe", "MZ"),
            ]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let results = body["resumes"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["parsedData"]["name"], "Grace Hopper");
        assert_eq!(results[1]["originalName"], "tool.exe");
        assert!(results[1]["error"].as_str().unwrap().contains("Unsupported"));

        let list = Request::builder().uri("/api/resumes").body(Body::empty()).unwrap();
        let (_, listing) = send(&router, list).await;
        assert_eq!(listing["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn test_ask_flow() {
        let router = test_router();
        send(
            &router,
            upload_request(&[
                ("ada.txt", "Ada Lovelace\nWrote Python analytics engines for years."),
                ("bob.txt", "Bob Stone\nCarpentry and woodwork."),
            ]),
        )
        .await;

        let (status, body) = send(
            &router,
            json_request("POST", "/api/ask", json!({"query": "python"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalResumes"], 2);
        let evidence = body["evidence"].as_array().unwrap();
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0]["resume"]["name"], "Ada Lovelace");
        assert!(body["answer"].as_str().unwrap().contains("Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_blank_query_is_400() {
        let router = test_router();
        let (status, body) =
            send(&router, json_request("POST", "/api/ask", json!({"query": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_QUERY");
    }

    #[tokio::test]
    async fn test_job_create_and_match() {
        let router = test_router();
        send(
            &router,
            upload_request(&[(
                "ada.txt",
                "Ada Lovelace\nReact specialist with 5 years of frontend work.",
            )]),
        )
        .await;

        let (status, job) = send(
            &router,
            json_request(
                "POST",
                "/api/jobs",
                json!({
                    "title": "Frontend Engineer",
                    "company": "Acme",
                    "requirements": ["5 years", "PhD"],
                    "preferredSkills": ["React"]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let job_id = job["id"].as_str().unwrap().to_string();

        let (status, fetched) = send(
            &router,
            Request::builder()
                .uri(format!("/api/jobs/{job_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["preferredSkills"][0], "React");

        let (status, body) = send(
            &router,
            json_request("POST", &format!("/api/jobs/{job_id}/match"), json!({"top_n": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["totalCandidates"], 1);
        assert_eq!(body["summary"]["requirements"], 2);
        let top = &body["matches"][0];
        assert_eq!(top["matchingSkills"][0], "react");
        assert_eq!(top["missingRequirements"][0], "PhD");
    }

    #[tokio::test]
    async fn test_unknown_job_is_404() {
        let router = test_router();
        let uri = format!("/api/jobs/{}/match", uuid::Uuid::new_v4());
        let (status, body) = send(&router, json_request("POST", &uri, json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
