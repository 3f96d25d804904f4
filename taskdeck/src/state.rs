//! The in-memory task collection and its mutation surface.
//!
//! [`TaskList`] is the client's authoritative ordered collection for the
//! current session. Every operation returns a new collection instead of
//! mutating in place, so callers can apply a change only once the backend
//! has confirmed it (and drop it on the floor otherwise).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use taskdeck_proto::task::{Task, TaskId};

/// Ordered collection of tasks, newest first.
///
/// Serializes transparently as a plain array of tasks — the shape durable
/// local storage expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Wraps an existing ordered set of tasks.
    #[must_use]
    pub const fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// The tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The task with the given id, if present.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Prepends a task (newest first).
    #[must_use]
    pub fn add(&self, task: Task) -> Self {
        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.push(task);
        tasks.extend(self.tasks.iter().cloned());
        Self { tasks }
    }

    /// Flips `completed` on the task with the given id; no-op if absent.
    #[must_use]
    pub fn toggle(&self, id: &TaskId) -> Self {
        self.map_task(id, |task| task.completed = !task.completed)
    }

    /// Replaces the text of the task with the given id.
    ///
    /// No-op if the id is absent or `new_text` trims to empty.
    #[must_use]
    pub fn edit(&self, id: &TaskId, new_text: &str) -> Self {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return self.clone();
        }
        self.map_task(id, |task| task.text = trimmed.to_string())
    }

    /// Drops the task with the given id; no-op if absent.
    #[must_use]
    pub fn remove(&self, id: &TaskId) -> Self {
        Self {
            tasks: self
                .tasks
                .iter()
                .filter(|t| &t.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Swaps in a replacement for the task with the given id, keeping its
    /// position; no-op if absent.
    ///
    /// The server-backed session applies update responses this way, so the
    /// store-stamped `updated_at` lands in local state.
    #[must_use]
    pub fn replace(&self, id: &TaskId, replacement: Task) -> Self {
        Self {
            tasks: self
                .tasks
                .iter()
                .map(|t| {
                    if &t.id == id {
                        replacement.clone()
                    } else {
                        t.clone()
                    }
                })
                .collect(),
        }
    }

    /// Applies a caller-supplied permutation of the current id set.
    ///
    /// A sequence that drops, duplicates, or introduces ids is not a
    /// permutation and is ignored (the collection is returned unchanged)
    /// rather than trusted.
    #[must_use]
    pub fn reorder(&self, order: &[TaskId]) -> Self {
        if !self.is_permutation(order) {
            tracing::warn!("reorder ignored: sequence is not a permutation of the task set");
            return self.clone();
        }
        Self {
            tasks: order
                .iter()
                .filter_map(|id| self.get(id))
                .cloned()
                .collect(),
        }
    }

    /// Moves the task with the given id to `position`, shifting the rest.
    ///
    /// This is the permutation a completed drag gesture emits ("move item
    /// A to position P"). Positions past the end clamp to the end; unknown
    /// ids are a no-op.
    #[must_use]
    pub fn move_task(&self, id: &TaskId, position: usize) -> Self {
        let Some(from) = self.tasks.iter().position(|t| &t.id == id) else {
            return self.clone();
        };
        let mut tasks = self.tasks.clone();
        let task = tasks.remove(from);
        let to = position.min(tasks.len());
        tasks.insert(to, task);
        Self { tasks }
    }

    /// Applies `f` to the task with the given id, cloning the rest.
    fn map_task(&self, id: &TaskId, f: impl Fn(&mut Task)) -> Self {
        Self {
            tasks: self
                .tasks
                .iter()
                .map(|t| {
                    let mut task = t.clone();
                    if &task.id == id {
                        f(&mut task);
                    }
                    task
                })
                .collect(),
        }
    }

    /// Whether `order` is exactly the current id set, each id once.
    fn is_permutation(&self, order: &[TaskId]) -> bool {
        if order.len() != self.tasks.len() {
            return false;
        }
        let current: HashSet<&TaskId> = self.tasks.iter().map(|t| &t.id).collect();
        let mut seen = HashSet::with_capacity(order.len());
        order.iter().all(|id| current.contains(id) && seen.insert(id))
    }
}
