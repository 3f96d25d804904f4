//! End-to-end tests for the server-backed client session.
//!
//! Exercises the full chain: controller → state container → repository →
//! HTTP → service → store, including the failure path where a dead server
//! must leave local state untouched.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use taskdeck::app::{App, Backend};
use taskdeck::repo::TaskRepository;
use taskdeck_proto::task::TaskId;
use taskdeck_server::service::start_server;

async fn start_test_server() -> (String, tokio::task::JoinHandle<()>) {
    let (addr, handle) = start_server("127.0.0.1:0")
        .await
        .expect("failed to start test server");
    (format!("http://{addr}"), handle)
}

fn repo(base: &str) -> TaskRepository {
    TaskRepository::new(base, Duration::from_secs(2)).expect("build repository")
}

async fn remote_app(base: &str) -> App {
    App::open(Backend::Remote(repo(base))).await
}

#[tokio::test]
async fn counts_track_adds_and_toggles() {
    let (base, _handle) = start_test_server().await;
    let mut app = remote_app(&base).await;

    app.add("a", None, None).await;
    app.add("b", None, None).await;
    app.add("c", None, None).await;

    let s = app.summary();
    assert_eq!((s.completed, s.total), (0, 3));

    let b = app
        .tasks()
        .tasks()
        .iter()
        .find(|t| t.text == "b")
        .map(|t| t.id.clone())
        .unwrap();
    app.toggle(&b).await;

    let s = app.summary();
    assert_eq!((s.completed, s.total), (1, 3));
    assert!(app.error().is_none());
}

#[tokio::test]
async fn session_state_is_a_cache_of_server_state() {
    let (base, _handle) = start_test_server().await;

    let mut app = remote_app(&base).await;
    app.add("shared", None, None).await;
    let id = app.tasks().tasks()[0].id.clone();
    app.toggle(&id).await;
    app.edit(&id, "shared, renamed").await;

    // A second session starts from a fresh full fetch and sees the same.
    let second = remote_app(&base).await;
    assert_eq!(second.tasks().len(), 1);
    let task = &second.tasks().tasks()[0];
    assert_eq!(task.id, id);
    assert_eq!(task.text, "shared, renamed");
    assert!(task.completed);
    assert!(task.updated_at.is_some());
}

#[tokio::test]
async fn add_applies_the_server_response_task() {
    let (base, _handle) = start_test_server().await;
    let mut app = remote_app(&base).await;

    app.add("  padded  ", None, None).await;

    // Local state holds the task as the server returned it.
    let task = &app.tasks().tasks()[0];
    assert_eq!(task.text, "padded");
    assert!(!task.completed);
    assert!(task.updated_at.is_none());
}

#[tokio::test]
async fn whitespace_add_makes_no_remote_call() {
    let (base, _handle) = start_test_server().await;
    let mut app = remote_app(&base).await;

    app.add("   ", None, None).await;
    assert_eq!(app.error(), Some("text is required"));
    assert!(app.tasks().is_empty());

    // The server never saw a request: a fresh session is still empty.
    let second = remote_app(&base).await;
    assert!(second.tasks().is_empty());
}

#[tokio::test]
async fn remove_propagates_to_the_server() {
    let (base, _handle) = start_test_server().await;
    let mut app = remote_app(&base).await;

    app.add("doomed", None, None).await;
    let id = app.tasks().tasks()[0].id.clone();
    app.remove(&id).await;

    assert!(app.tasks().is_empty());
    assert!(app.error().is_none());

    let second = remote_app(&base).await;
    assert!(second.tasks().is_empty());
}

#[tokio::test]
async fn remove_unknown_id_is_local_noop() {
    let (base, _handle) = start_test_server().await;
    let mut app = remote_app(&base).await;

    app.add("keep", None, None).await;
    app.remove(&TaskId::new()).await;

    assert_eq!(app.tasks().len(), 1);
    assert!(app.error().is_none());
}

#[tokio::test]
async fn failed_mutation_leaves_state_unchanged_and_surfaces_one_error() {
    let (base, handle) = start_test_server().await;
    let mut app = remote_app(&base).await;

    app.add("survivor", None, None).await;
    let id = app.tasks().tasks()[0].id.clone();
    let before = app.tasks().clone();

    // Kill the server; the next call cannot complete.
    handle.abort();
    tokio::time::sleep(Duration::from_millis(50)).await;

    app.toggle(&id).await;
    let first_error = app.error().map(str::to_string).unwrap();
    assert!(first_error.contains("update task"), "got: {first_error}");
    assert_eq!(app.tasks(), &before, "failed toggle must not change state");

    // A later failure replaces the message rather than stacking.
    app.add("unreachable", None, None).await;
    let second_error = app.error().unwrap();
    assert!(second_error.contains("create task"), "got: {second_error}");
    assert_eq!(app.tasks(), &before);

    app.dismiss_error();
    assert!(app.error().is_none());
}

#[tokio::test]
async fn session_against_dead_server_starts_empty_with_error() {
    let (base, handle) = start_test_server().await;
    handle.abort();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let app = remote_app(&base).await;
    assert!(app.tasks().is_empty());
    let error = app.error().unwrap();
    assert!(error.contains("fetch tasks"), "got: {error}");
}

#[tokio::test]
async fn reorder_is_client_side_only() {
    let (base, _handle) = start_test_server().await;
    let mut app = remote_app(&base).await;

    app.add("a", None, None).await;
    app.add("b", None, None).await; // display: b, a

    let mut order: Vec<TaskId> = app.tasks().tasks().iter().map(|t| t.id.clone()).collect();
    order.reverse();
    app.reorder(&order);

    let texts: Vec<&str> = app.tasks().tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b"]);
    let s = app.summary();
    assert_eq!((s.completed, s.total), (0, 2));

    // The server still lists newest first — order never left the client.
    let second = remote_app(&base).await;
    let texts: Vec<&str> = second
        .tasks()
        .tasks()
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(texts, vec!["b", "a"]);
}
