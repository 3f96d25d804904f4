//! Application controller: owns the task list state and the backend.
//!
//! [`App`] is the explicit state container for a session — the collection
//! is mutated only through the operations here, and there is no ambient or
//! static state. In the standalone variant every mutation is applied then
//! persisted to local storage; in the server-backed variant the repository
//! call comes first and the state change is applied only on success, so a
//! failed remote call leaves local state untouched and surfaces a single
//! dismissible error message, replacing any prior one.

use chrono::{DateTime, Utc};

use taskdeck_proto::task::{Priority, Task, TaskId};
use taskdeck_proto::wire::UpdateTask;

use crate::repo::TaskRepository;
use crate::state::TaskList;
use crate::storage::LocalStore;
use crate::view::{self, ListSummary, SortMode};

/// Where mutations are made durable.
pub enum Backend {
    /// Standalone variant: browserless local persistence.
    Local(LocalStore),
    /// Server-backed variant: state is a cache of server state.
    Remote(TaskRepository),
}

/// A task list session.
pub struct App {
    tasks: TaskList,
    backend: Backend,
    sort: SortMode,
    error: Option<String>,
}

impl App {
    /// Opens a session: loads from local storage, or fetches the full list
    /// from the server once. This is the only point the server-backed
    /// variant reads the remote list — there is no polling afterwards.
    pub async fn open(backend: Backend) -> Self {
        let mut app = Self {
            tasks: TaskList::new(),
            backend,
            sort: SortMode::default(),
            error: None,
        };
        match &app.backend {
            Backend::Local(store) => app.tasks = store.load(),
            Backend::Remote(repo) => match repo.list().await {
                Ok(tasks) => app.tasks = TaskList::from_tasks(tasks),
                Err(e) => app.error = Some(e.to_string()),
            },
        }
        app
    }

    /// The current collection.
    #[must_use]
    pub const fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// The current error message, if one is showing.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Dismisses the current error message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Sets the display sort mode.
    pub const fn set_sort(&mut self, mode: SortMode) {
        self.sort = mode;
    }

    /// The display sequence under the current sort mode.
    #[must_use]
    pub fn view(&self) -> Vec<&Task> {
        view::sorted(&self.tasks, self.sort)
    }

    /// Completed/total counts for the current collection.
    #[must_use]
    pub fn summary(&self) -> ListSummary {
        view::summary(&self.tasks)
    }

    /// Adds a task. Whitespace-only text is rejected locally — no remote
    /// call is made and the collection is unchanged.
    pub async fn add(
        &mut self,
        text: &str,
        due_date: Option<DateTime<Utc>>,
        priority: Option<Priority>,
    ) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.error = Some("text is required".to_string());
            return;
        }
        match &self.backend {
            Backend::Remote(repo) => match repo.create(trimmed, due_date, priority).await {
                Ok(task) => self.tasks = self.tasks.add(task),
                Err(e) => self.error = Some(e.to_string()),
            },
            Backend::Local(_) => {
                let next = self
                    .tasks
                    .add(Task::new(trimmed.to_string(), due_date, priority));
                self.commit(next);
            }
        }
    }

    /// Flips completion on a task; no-op if the id is unknown.
    pub async fn toggle(&mut self, id: &TaskId) {
        let Some(task) = self.tasks.get(id) else {
            return;
        };
        let next_completed = !task.completed;
        match &self.backend {
            Backend::Remote(repo) => {
                let changes = UpdateTask {
                    completed: Some(next_completed),
                    ..UpdateTask::default()
                };
                match repo.update(id, changes).await {
                    Ok(updated) => self.tasks = self.tasks.replace(id, updated),
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            Backend::Local(_) => {
                let next = self.tasks.toggle(id);
                self.commit(next);
            }
        }
    }

    /// Replaces a task's text; no-op if the id is unknown or the new text
    /// trims to empty.
    pub async fn edit(&mut self, id: &TaskId, new_text: &str) {
        let trimmed = new_text.trim();
        if trimmed.is_empty() || self.tasks.get(id).is_none() {
            return;
        }
        match &self.backend {
            Backend::Remote(repo) => {
                let changes = UpdateTask {
                    text: Some(trimmed.to_string()),
                    ..UpdateTask::default()
                };
                match repo.update(id, changes).await {
                    Ok(updated) => self.tasks = self.tasks.replace(id, updated),
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            Backend::Local(_) => {
                let next = self.tasks.edit(id, trimmed);
                self.commit(next);
            }
        }
    }

    /// Deletes a task; no-op if the id is unknown.
    pub async fn remove(&mut self, id: &TaskId) {
        if self.tasks.get(id).is_none() {
            return;
        }
        match &self.backend {
            Backend::Remote(repo) => match repo.delete(id).await {
                Ok(_deleted) => self.tasks = self.tasks.remove(id),
                Err(e) => self.error = Some(e.to_string()),
            },
            Backend::Local(_) => {
                let next = self.tasks.remove(id);
                self.commit(next);
            }
        }
    }

    /// Applies a reorder permutation (see [`TaskList::reorder`]).
    ///
    /// Display order is a client-side concern: the server keeps no order
    /// field, so this never makes a remote call.
    pub fn reorder(&mut self, order: &[TaskId]) {
        let next = self.tasks.reorder(order);
        self.commit(next);
    }

    /// Moves a task to a position — the permutation a finished drag
    /// gesture emits. Client-side only, like [`reorder`](Self::reorder).
    pub fn move_task(&mut self, id: &TaskId, position: usize) {
        let next = self.tasks.move_task(id, position);
        self.commit(next);
    }

    /// Applies a state change and, in the standalone variant, serializes
    /// the full collection to storage. A persistence failure keeps the
    /// in-memory change and surfaces the error.
    fn commit(&mut self, next: TaskList) {
        self.tasks = next;
        if let Backend::Local(store) = &self.backend
            && let Err(e) = store.save(&self.tasks)
        {
            let message = e.to_string();
            tracing::warn!(error = %message, "failed to persist task list");
            self.error = Some(message);
        }
    }
}
