//! End-to-end tests for the standalone variant: durable local storage.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use taskdeck::app::{App, Backend};
use taskdeck::storage::LocalStore;
use taskdeck_proto::task::Priority;

fn temp_dir() -> PathBuf {
    std::env::temp_dir()
        .join("taskdeck-test")
        .join(uuid::Uuid::now_v7().to_string())
}

async fn local_app(dir: &PathBuf) -> App {
    App::open(Backend::Local(LocalStore::new(dir))).await
}

#[tokio::test]
async fn first_run_starts_empty() {
    let dir = temp_dir();
    let app = local_app(&dir).await;
    assert!(app.tasks().is_empty());
    assert!(app.error().is_none());
}

#[tokio::test]
async fn round_trip_preserves_ids_text_completed_and_timestamps() {
    let dir = temp_dir();
    let mut app = local_app(&dir).await;

    app.add("groceries", Some(chrono::Utc::now()), Some(Priority::High))
        .await;
    app.add("laundry", None, None).await;
    let id = app.tasks().tasks()[1].id.clone();
    app.toggle(&id).await;

    let before = app.tasks().clone();
    let reopened = local_app(&dir).await;

    assert_eq!(reopened.tasks(), &before);
    for (stored, original) in reopened.tasks().tasks().iter().zip(before.tasks()) {
        assert_eq!(stored.id, original.id);
        assert_eq!(stored.text, original.text);
        assert_eq!(stored.completed, original.completed);
        // A real timestamp again, not a string.
        assert_eq!(stored.created_at, original.created_at);
    }
}

#[tokio::test]
async fn corrupted_storage_is_treated_as_empty() {
    let dir = temp_dir();
    let store = LocalStore::new(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(store.path(), "invalid json").unwrap();

    let app = local_app(&dir).await;
    assert!(app.tasks().is_empty());
    assert!(app.error().is_none());
}

#[tokio::test]
async fn mutating_after_corruption_overwrites_the_file() {
    let dir = temp_dir();
    let store = LocalStore::new(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(store.path(), "invalid json").unwrap();

    let mut app = local_app(&dir).await;
    app.add("fresh start", None, None).await;
    assert!(app.error().is_none());

    let reopened = local_app(&dir).await;
    assert_eq!(reopened.tasks().len(), 1);
    assert_eq!(reopened.tasks().tasks()[0].text, "fresh start");
}

#[tokio::test]
async fn every_mutation_is_persisted() {
    let dir = temp_dir();
    let mut app = local_app(&dir).await;

    app.add("one", None, None).await;
    assert_eq!(local_app(&dir).await.tasks().len(), 1);

    app.add("two", None, None).await;
    assert_eq!(local_app(&dir).await.tasks().len(), 2);

    let id = app.tasks().tasks()[0].id.clone();
    app.remove(&id).await;
    assert_eq!(local_app(&dir).await.tasks().len(), 1);
}

#[tokio::test]
async fn edit_and_move_survive_reload() {
    let dir = temp_dir();
    let mut app = local_app(&dir).await;

    app.add("a", None, None).await;
    app.add("b", None, None).await;
    app.add("c", None, None).await; // display: c, b, a

    let c = app.tasks().tasks()[0].id.clone();
    app.edit(&c, "c, renamed").await;
    app.move_task(&c, 2);

    let reopened = local_app(&dir).await;
    let texts: Vec<&str> = reopened
        .tasks()
        .tasks()
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(texts, vec!["b", "a", "c, renamed"]);
}
