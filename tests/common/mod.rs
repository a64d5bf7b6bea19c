//! A stand-in `/chat` backend for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

/// Serve `router` on an ephemeral port and return the `/chat` URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/chat")
}

/// An address nothing is listening on
pub async fn dead_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/chat")
}

/// Answers a couple of canned FAQ questions and echoes everything else.
/// Rejects an empty message with 400, like the real backend.
pub fn faq_backend() -> Router {
    Router::new().route("/chat", post(faq))
}

async fn faq(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    assert_eq!(
        headers.get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let message = body["message"].as_str().unwrap_or_default();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No message provided" })),
        );
    }

    let reply = match message.to_lowercase().trim() {
        "hello" => "Hi there".to_string(),
        "what is your name" => "I'm a simple FAQ bot.".to_string(),
        _ => format!("echo: {message}"),
    };
    (StatusCode::OK, Json(json!({ "response": reply })))
}

pub fn plain_text_backend() -> Router {
    Router::new().route("/chat", post(|| async { "definitely not json" }))
}

pub fn wrong_shape_backend() -> Router {
    Router::new().route("/chat", post(|| async { Json(json!({ "answer": "42" })) }))
}

pub fn failing_backend() -> Router {
    Router::new().route(
        "/chat",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    )
}

pub fn slow_backend(delay: Duration) -> Router {
    Router::new().route(
        "/chat",
        post(move || async move {
            tokio::time::sleep(delay).await;
            Json(json!({ "response": "finally" }))
        }),
    )
}

/// 500 status, but the body still carries a reply
pub fn error_status_with_reply_backend() -> Router {
    Router::new().route(
        "/chat",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "response": "degraded answer" })),
            )
        }),
    )
}
