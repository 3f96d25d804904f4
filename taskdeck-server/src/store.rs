//! Task Store contract and the in-memory implementation.
//!
//! The [`TaskStore`] trait is the persistence seam of the service: document
//! CRUD by identifier plus a sorted read-all. Handlers never see storage
//! details — they get back domain [`Task`] values or a
//! [`StoreError::Unavailable`] that maps to a server-error response.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use taskdeck_proto::task::{Task, TaskId};
use taskdeck_proto::wire::UpdateTask;

/// Errors surfaced by a task store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying persistence is unreachable or failing.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Trait for persisting tasks.
///
/// Implementations include [`MemoryStore`] (process-local, used in
/// production single-instance deployments and tests). The store owns
/// `updated_at`: every successful [`update`](TaskStore::update) stamps it.
pub trait TaskStore: Send + Sync {
    /// Check that the store is reachable.
    fn ping(&self) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Insert a new task, returning it as stored.
    fn insert(&self, task: Task)
    -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Fetch a single task by id, `None` if absent.
    fn get(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<Option<Task>, StoreError>> + Send;

    /// Apply a partial update to the task with the given id.
    ///
    /// Only fields present in `changes` are touched; `id` and `created_at`
    /// never change. Returns the updated task, or `None` if absent.
    fn update(
        &self,
        id: &TaskId,
        changes: UpdateTask,
    ) -> impl std::future::Future<Output = Result<Option<Task>, StoreError>> + Send;

    /// Delete the task with the given id, returning its prior state,
    /// or `None` if absent.
    fn remove(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<Option<Task>, StoreError>> + Send;

    /// All tasks ordered by `created_at` descending (newest first).
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Task>, StoreError>> + Send;
}

/// In-memory task store keyed by [`TaskId`].
///
/// Thread-safe via [`RwLock`]. Conflicting writes to the same task are
/// serialized at the lock, which is all the coordination the service
/// assumes of any store.
#[derive(Default)]
pub struct MemoryStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl MemoryStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
        }
    }
}

impl TaskStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(&self, task: Task) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn get(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(id).cloned())
    }

    async fn update(&self, id: &TaskId, changes: UpdateTask) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(id) else {
            return Ok(None);
        };
        if let Some(text) = changes.text {
            task.text = text;
        }
        if let Some(completed) = changes.completed {
            task.completed = completed;
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        task.updated_at = Some(Utc::now());
        Ok(Some(task.clone()))
    }

    async fn remove(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.remove(id))
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        let mut all: Vec<Task> = tasks.values().cloned().collect();
        // Newest first; id as tie-break for a deterministic order.
        all.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });
        Ok(all)
    }
}
