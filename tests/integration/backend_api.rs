//! Integration tests for the backend's HTTP contract, exercised with a
//! raw HTTP client rather than the typed gateway: status codes for
//! missing/invalid credentials, ownership checks, validation failures,
//! and row echo on insert.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{Value, json};

use flowspace_backend::auth::TokenAuth;
use flowspace_backend::server::{AppState, start_server, start_server_with_state};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

async fn start_backend() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    start_server("127.0.0.1:0").await.expect("start backend")
}

fn task_body(user: &str, title: &str, due: &str) -> Value {
    json!({
        "user_id": user,
        "title": title,
        "description": "",
        "priority": "medium",
        "status": "todo",
        "due_date": due,
        "assignee": "You",
        "tags": [],
        "completed": false,
    })
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn requests_without_bearer_token_get_401() {
    let (addr, _server) = start_backend().await;
    let client = reqwest::Client::new();

    let status = client
        .get(format!("http://{addr}/v1/tasks"))
        .send()
        .await
        .expect("send")
        .status();
    assert_eq!(status, 401);
}

#[tokio::test]
async fn unknown_token_shapes_get_401() {
    let (addr, _server) = start_backend().await;
    let client = reqwest::Client::new();

    for token in ["garbage", "user:", ""] {
        let status = client
            .get(format!("http://{addr}/v1/tasks"))
            .bearer_auth(token)
            .send()
            .await
            .expect("send")
            .status();
        assert_eq!(status, 401, "token {token:?} should be rejected");
    }
}

#[tokio::test]
async fn static_token_table_mode_rejects_user_tokens() {
    let tokens: HashMap<String, String> =
        [("secret-alice".to_string(), "alice".to_string())].into();
    let state = Arc::new(AppState::new(TokenAuth::new(tokens, false)));
    let (addr, _server) = start_server_with_state("127.0.0.1:0", state)
        .await
        .expect("start backend");
    let client = reqwest::Client::new();

    // Self-identifying tokens are disabled.
    let status = client
        .get(format!("http://{addr}/v1/tasks"))
        .bearer_auth("user:alice")
        .send()
        .await
        .expect("send")
        .status();
    assert_eq!(status, 401);

    // The static token resolves.
    let status = client
        .get(format!("http://{addr}/v1/tasks"))
        .bearer_auth("secret-alice")
        .send()
        .await
        .expect("send")
        .status();
    assert_eq!(status, 200);
}

// ---------------------------------------------------------------------------
// Ownership and validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insert_with_foreign_user_id_gets_403() {
    let (addr, _server) = start_backend().await;
    let client = reqwest::Client::new();

    let status = client
        .post(format!("http://{addr}/v1/tasks"))
        .bearer_auth("user:alice")
        .json(&task_body("bob", "not yours", "2024-11-05"))
        .send()
        .await
        .expect("send")
        .status();
    assert_eq!(status, 403);
}

#[tokio::test]
async fn invalid_due_date_gets_422() {
    let (addr, _server) = start_backend().await;
    let client = reqwest::Client::new();

    for due in ["11/05/2024", "2024-13-40", "soon"] {
        let status = client
            .post(format!("http://{addr}/v1/tasks"))
            .bearer_auth("user:alice")
            .json(&task_body("alice", "badly dated", due))
            .send()
            .await
            .expect("send")
            .status();
        assert_eq!(status, 422, "due_date {due:?} should be rejected");
    }
}

#[tokio::test]
async fn invalid_event_time_gets_422() {
    let (addr, _server) = start_backend().await;
    let client = reqwest::Client::new();

    let status = client
        .post(format!("http://{addr}/v1/events"))
        .bearer_auth("user:alice")
        .json(&json!({
            "user_id": "alice",
            "title": "Standup",
            "date": "2024-11-05",
            "time": "9 o'clock",
            "duration": "1h",
        }))
        .send()
        .await
        .expect("send")
        .status();
    assert_eq!(status, 422);
}

// ---------------------------------------------------------------------------
// Row lifecycle over raw HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insert_echoes_row_with_assigned_id() {
    let (addr, _server) = start_backend().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/v1/tasks"))
        .bearer_auth("user:alice")
        .json(&task_body("alice", "echo me", "2024-11-05"))
        .send()
        .await
        .expect("send");
    assert_eq!(response.status(), 201);

    let row: Value = response.json().await.expect("json");
    assert!(!row["id"].as_str().expect("id").is_empty());
    assert_eq!(row["user_id"], "alice");
    assert_eq!(row["title"], "echo me");
    assert_eq!(row["due_date"], "2024-11-05");
}

#[tokio::test]
async fn patch_merges_and_answers_204() {
    let (addr, _server) = start_backend().await;
    let client = reqwest::Client::new();

    let row: Value = client
        .post(format!("http://{addr}/v1/tasks"))
        .bearer_auth("user:alice")
        .json(&task_body("alice", "patch me", "2024-11-05"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    let id = row["id"].as_str().expect("id");

    let status = client
        .patch(format!("http://{addr}/v1/tasks/{id}"))
        .bearer_auth("user:alice")
        .json(&json!({"completed": true, "status": "completed"}))
        .send()
        .await
        .expect("send")
        .status();
    assert_eq!(status, 204);

    let rows: Value = client
        .get(format!("http://{addr}/v1/tasks"))
        .bearer_auth("user:alice")
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    assert_eq!(rows[0]["completed"], true);
    assert_eq!(rows[0]["status"], "completed");
    assert_eq!(rows[0]["title"], "patch me"); // untouched by the patch
}

#[tokio::test]
async fn patch_of_foreign_row_gets_404() {
    let (addr, _server) = start_backend().await;
    let client = reqwest::Client::new();

    let row: Value = client
        .post(format!("http://{addr}/v1/tasks"))
        .bearer_auth("user:alice")
        .json(&task_body("alice", "hers", "2024-11-05"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    let id = row["id"].as_str().expect("id");

    let status = client
        .patch(format!("http://{addr}/v1/tasks/{id}"))
        .bearer_auth("user:bob")
        .json(&json!({"title": "stolen"}))
        .send()
        .await
        .expect("send")
        .status();
    assert_eq!(status, 404);
}

#[tokio::test]
async fn delete_answers_204_then_404() {
    let (addr, _server) = start_backend().await;
    let client = reqwest::Client::new();

    let row: Value = client
        .post(format!("http://{addr}/v1/tasks"))
        .bearer_auth("user:alice")
        .json(&task_body("alice", "doomed", "2024-11-05"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    let id = row["id"].as_str().expect("id");

    let first = client
        .delete(format!("http://{addr}/v1/tasks/{id}"))
        .bearer_auth("user:alice")
        .send()
        .await
        .expect("send")
        .status();
    assert_eq!(first, 204);

    let second = client
        .delete(format!("http://{addr}/v1/tasks/{id}"))
        .bearer_auth("user:alice")
        .send()
        .await
        .expect("send")
        .status();
    assert_eq!(second, 404);
}

#[tokio::test]
async fn lists_are_scoped_to_the_caller() {
    let (addr, _server) = start_backend().await;
    let client = reqwest::Client::new();

    client
        .post(format!("http://{addr}/v1/tasks"))
        .bearer_auth("user:alice")
        .json(&task_body("alice", "hers", "2024-11-05"))
        .send()
        .await
        .expect("send");

    let bobs: Value = client
        .get(format!("http://{addr}/v1/tasks"))
        .bearer_auth("user:bob")
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    assert_eq!(bobs.as_array().expect("array").len(), 0);
}
