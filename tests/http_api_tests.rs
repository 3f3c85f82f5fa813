// Integration tests for the HTTP API
//
// These tests drive the router directly with `oneshot` requests, with a
// scripted upstream standing in for the chat-completion service.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{test_router, ScriptedUpstream, FEEDBACK_JSON};
use mock_interview::config::UpstreamConfig;
use mock_interview::llm::{RelayError, SamplingParams};
use mock_interview::OpenAiClient;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn conversation_body() -> Value {
    json!({
        "messages": [
            { "role": "assistant", "content": "안녕하세요 Kim님! AI 면접을 시작하겠습니다. 먼저 자기소개 부탁드립니다." },
            { "role": "user", "content": "저는 백엔드 개발자입니다." }
        ],
        "interviewType": "technical",
        "jobPosition": "developer"
    })
}

#[tokio::test]
async fn test_health_reports_credential() {
    let dir = TempDir::new().unwrap();
    let router = test_router(Arc::new(ScriptedUpstream::new()), dir.path()).await;

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Server is running");
    assert_eq!(body["apiKeySet"], true);
}

#[tokio::test]
async fn test_health_without_key() {
    let dir = TempDir::new().unwrap();
    let client = OpenAiClient::new(&UpstreamConfig {
        api_key: None,
        ..UpstreamConfig::default()
    })
    .unwrap();
    let router = test_router(Arc::new(client), dir.path()).await;

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["apiKeySet"], false);
}

#[tokio::test]
async fn test_chat_returns_next_question() {
    let dir = TempDir::new().unwrap();
    let upstream = Arc::new(ScriptedUpstream::with_replies(vec![Ok(
        "REST와 GraphQL의 차이를 설명해주세요.".to_string(),
    )]));
    let router = test_router(upstream.clone(), dir.path()).await;

    let (status, body) = send(router, post_json("/api/chat", conversation_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "REST와 GraphQL의 차이를 설명해주세요.");

    let calls = upstream.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, SamplingParams::CONVERSATION);
    assert_eq!(calls[0].0.len(), 3);
}

#[tokio::test]
async fn test_chat_unknown_selection_falls_back() {
    let dir = TempDir::new().unwrap();
    let upstream = Arc::new(ScriptedUpstream::new());
    let router = test_router(upstream.clone(), dir.path()).await;

    let body = json!({
        "messages": [{ "role": "user", "content": "hello" }],
        "interviewType": "astrology",
        "jobPosition": "wizard"
    });
    let (status, _) = send(router, post_json("/api/chat", body)).await;
    assert_eq!(status, StatusCode::OK);

    let calls = upstream.calls.lock().unwrap();
    assert_eq!(
        calls[0].0[0].content,
        mock_interview::resolve("personality", "general")
    );
}

#[tokio::test]
async fn test_chat_without_key_is_server_error() {
    let dir = TempDir::new().unwrap();
    let client = OpenAiClient::new(&UpstreamConfig {
        api_key: None,
        ..UpstreamConfig::default()
    })
    .unwrap();
    let router = test_router(Arc::new(client), dir.path()).await;

    let (status, body) = send(router, post_json("/api/chat", conversation_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("API key"));
}

#[tokio::test]
async fn test_chat_passes_upstream_status_through() {
    let dir = TempDir::new().unwrap();
    let upstream = Arc::new(ScriptedUpstream::with_replies(vec![Err(
        RelayError::UpstreamUnavailable {
            status: Some(429),
            message: "Rate limit reached".to_string(),
        },
    )]));
    let router = test_router(upstream, dir.path()).await;

    let (status, body) = send(router, post_json("/api/chat", conversation_body())).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["details"], "Rate limit reached");
}

#[tokio::test]
async fn test_chat_transport_failure_is_server_error() {
    let dir = TempDir::new().unwrap();
    let upstream = Arc::new(ScriptedUpstream::with_replies(vec![Err(
        RelayError::UpstreamUnavailable {
            status: None,
            message: "connection reset".to_string(),
        },
    )]));
    let router = test_router(upstream, dir.path()).await;

    let (status, _) = send(router, post_json("/api/chat", conversation_body())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_feedback_returns_structured_object() {
    let dir = TempDir::new().unwrap();
    let upstream = Arc::new(ScriptedUpstream::with_replies(vec![Ok(
        FEEDBACK_JSON.to_string(),
    )]));
    let router = test_router(upstream.clone(), dir.path()).await;

    let (status, body) = send(router, post_json("/api/feedback", conversation_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 82);
    assert_eq!(body["strengths"].as_array().unwrap().len(), 2);
    assert_eq!(body["improvements"].as_array().unwrap().len(), 2);
    assert_eq!(body["keywords"].as_array().unwrap().len(), 5);
    assert_eq!(body["summary"], "Solid technical interview");
    assert_eq!(upstream.evaluation_calls(), 1);
}

#[tokio::test]
async fn test_feedback_in_code_fence_matches_plain() {
    let dir = TempDir::new().unwrap();
    let upstream = Arc::new(ScriptedUpstream::with_replies(vec![
        Ok(FEEDBACK_JSON.to_string()),
        Ok(format!("```json\n{}\n```", FEEDBACK_JSON)),
    ]));
    let router = test_router(upstream, dir.path()).await;

    let (_, plain) = send(
        router.clone(),
        post_json("/api/feedback", conversation_body()),
    )
    .await;
    let (status, fenced) = send(router, post_json("/api/feedback", conversation_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plain, fenced);
}

#[tokio::test]
async fn test_feedback_parse_failure_includes_raw_text() {
    let dir = TempDir::new().unwrap();
    let upstream = Arc::new(ScriptedUpstream::with_replies(vec![Ok(
        "Great interview overall!".to_string(),
    )]));
    let router = test_router(upstream, dir.path()).await;

    let (status, body) = send(router, post_json("/api/feedback", conversation_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to parse feedback");
    assert_eq!(body["details"], "Great interview overall!");
}

#[tokio::test]
async fn test_feedback_out_of_range_score_rejected() {
    let dir = TempDir::new().unwrap();
    let reply = FEEDBACK_JSON.replace("\"score\":82", "\"score\":140");
    let upstream = Arc::new(ScriptedUpstream::with_replies(vec![Ok(reply)]));
    let router = test_router(upstream, dir.path()).await;

    let (status, _) = send(router, post_json("/api/feedback", conversation_body())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_malformed_request_body_rejected() {
    let dir = TempDir::new().unwrap();
    let upstream = Arc::new(ScriptedUpstream::new());
    let router = test_router(upstream.clone(), dir.path()).await;

    let (status, _) = send(router, post_json("/api/chat", json!({ "messages": "nope" }))).await;

    assert!(status.is_client_error());
    assert_eq!(upstream.call_count(), 0);
}
