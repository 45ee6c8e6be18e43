//! Integration tests for the Axum web server.
//!
//! These tests drive the real router with tower's `oneshot`, using a fast
//! runner config so full task lifecycles finish in milliseconds.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use kordonia_axum::bootstrap::{CorsConfig, ServerConfig, bootstrap};
use kordonia_axum::routes::create_router;
use kordonia_core::task::RunnerConfig;

fn test_router() -> axum::Router {
    let config = ServerConfig {
        port: 0, // Not used in tests
        runner: RunnerConfig::fast(),
        cors: CorsConfig::AllowAll,
    };
    create_router(bootstrap(&config), &config.cors)
}

async fn push_task(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/push")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    json["task_id"].as_str().expect("task_id field").to_string()
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn push_returns_a_task_id() {
    let app = test_router();
    let task_id = push_task(&app).await;
    assert!(!task_id.is_empty());
}

#[tokio::test]
async fn push_creates_distinct_tasks() {
    let app = test_router();
    let a = push_task(&app).await;
    let b = push_task(&app).await;
    assert_ne!(a, b);
}

#[tokio::test]
async fn stream_unknown_task_returns_404() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stream?task_id=does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn stream_missing_task_id_is_a_client_error() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stream")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn stream_delivers_progress_to_completion() {
    let app = test_router();
    let task_id = push_task(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/stream?task_id={task_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/event-stream"))
    );

    // The body stream ends once the task completes, so collecting it
    // terminates with the fast runner config.
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = std::str::from_utf8(&body).unwrap();

    let progresses: Vec<f64> = text
        .lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .map(|data| {
            let json: serde_json::Value = serde_json::from_str(data).unwrap();
            json["progress"].as_f64().expect("progress field")
        })
        .collect();

    assert!(!progresses.is_empty());
    assert_eq!(*progresses.last().unwrap(), 100.0);
    for pair in progresses.windows(2) {
        assert!(pair[1] >= pair[0]);
    }
}
