//! End-to-end tests for the REST surface of the task service.
//!
//! Each test starts an in-process server on an OS-assigned port and talks
//! to it over real HTTP.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use serde_json::json;

use taskdeck_proto::task::TaskId;
use taskdeck_proto::wire::{DeleteResponse, ErrorBody, Health, TaskDto};
use taskdeck_server::service::start_server;

async fn start_test_server() -> (String, tokio::task::JoinHandle<()>) {
    let (addr, handle) = start_server("127.0.0.1:0")
        .await
        .expect("failed to start test server");
    (format!("http://{addr}"), handle)
}

#[tokio::test]
async fn health_reports_ok() {
    let (base, _handle) = start_test_server().await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Health = resp.json().await.unwrap();
    assert_eq!(body.status, "ok");
}

#[tokio::test]
async fn post_then_list_returns_created_task_first() {
    let (base, _handle) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/todos"))
        .json(&json!({"text": "buy milk"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let created: TaskDto = resp.json().await.unwrap();
    assert_eq!(created.text, "buy milk");
    assert!(!created.completed);

    let listed: Vec<TaskDto> = reqwest::get(format!("{base}/todos"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.first().map(|t| t.text.as_str()), Some("buy milk"));
    assert_eq!(listed.first().map(|t| t.id.clone()), Some(created.id));
}

#[tokio::test]
async fn post_empty_text_is_rejected_with_400() {
    let (base, _handle) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/todos"))
        .json(&json!({"text": "   "}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let err: ErrorBody = resp.json().await.unwrap();
    assert_eq!(err.message, "text is required");

    // Nothing was stored.
    let listed: Vec<TaskDto> = reqwest::get(format!("{base}/todos"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn put_unknown_id_returns_404() {
    let (base, _handle) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/todos/{}", TaskId::new()))
        .json(&json!({"completed": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn partial_put_changes_only_named_fields() {
    let (base, _handle) = start_test_server().await;
    let client = reqwest::Client::new();

    let created: TaskDto = client
        .post(format!("{base}/todos"))
        .json(&json!({
            "text": "write report",
            "dueDate": "2026-09-01T00:00:00Z",
            "priority": "high"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let updated: TaskDto = client
        .put(format!("{base}/todos/{}", created.id))
        .json(&json!({"completed": true}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(updated.completed);
    assert_eq!(updated.text, "write report");
    assert_eq!(updated.due_date, created.due_date);
    assert_eq!(updated.priority, created.priority);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn put_null_clears_due_date_and_priority() {
    let (base, _handle) = start_test_server().await;
    let client = reqwest::Client::new();

    let created: TaskDto = client
        .post(format!("{base}/todos"))
        .json(&json!({
            "text": "dated",
            "dueDate": "2026-09-01T00:00:00Z",
            "priority": "low"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let updated: TaskDto = client
        .put(format!("{base}/todos/{}", created.id))
        .json(&json!({"dueDate": null, "priority": null}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(updated.due_date.is_none());
    assert!(updated.priority.is_none());
    // Omitted fields were left alone.
    assert_eq!(updated.text, "dated");
    assert!(!updated.completed);
}

#[tokio::test]
async fn delete_returns_prior_state_and_second_delete_is_404() {
    let (base, _handle) = start_test_server().await;
    let client = reqwest::Client::new();

    let created: TaskDto = client
        .post(format!("{base}/todos"))
        .json(&json!({"text": "doomed"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let resp = client
        .delete(format!("{base}/todos/{}", created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: DeleteResponse = resp.json().await.unwrap();
    assert_eq!(body.deleted_task.id, created.id);
    assert_eq!(body.deleted_task.text, "doomed");

    let resp = client
        .delete(format!("{base}/todos/{}", created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let listed: Vec<TaskDto> = reqwest::get(format!("{base}/todos"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn wire_identifier_travels_under_store_field_name() {
    let (base, _handle) = start_test_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/todos"))
        .json(&json!({"text": "check the wire"}))
        .send()
        .await
        .unwrap();

    let raw = reqwest::get(format!("{base}/todos"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(raw.contains("\"_id\""));
    assert!(raw.contains("\"createdAt\""));
}
