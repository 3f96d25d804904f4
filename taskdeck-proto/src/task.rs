//! The task entity shared by the `taskdeck` server and client.
//!
//! A [`Task`] is the sole persisted unit: an item of text with a completion
//! flag, creation/update timestamps, and optional due date and priority.
//! The wire-level JSON representation lives in [`crate::wire`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task, based on UUID v7 for time-ordering.
///
/// The server's store assigns one on create; the standalone client assigns
/// one locally. Ids are opaque and immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority of a task.
///
/// Absence of a priority is a distinct state, not a fourth level; it is
/// modeled as `Option<Priority>` on [`Task`] and sorts after all three
/// levels (see [`Priority::rank`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Most urgent.
    High,
    /// Default middle level.
    Medium,
    /// Least urgent.
    Low,
}

impl Priority {
    /// Sort rank: high(0) < medium(1) < low(2). A task with no priority
    /// ranks 3, after all of these.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown priority '{other}' (high, medium, low)")),
        }
    }
}

/// A single to-do item.
///
/// `id` and `created_at` are immutable after creation; `updated_at` is
/// stamped by the store on every mutation (server variant only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// The task text. Never empty or whitespace-only once stored.
    pub text: String,
    /// Whether the task is done.
    pub completed: bool,
    /// When this task was created.
    pub created_at: DateTime<Utc>,
    /// When this task was last mutated, if ever.
    pub updated_at: Option<DateTime<Utc>>,
    /// Optional due date. No ordering relative to `created_at` is enforced.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional priority level.
    pub priority: Option<Priority>,
}

impl Task {
    /// Constructs a fresh task: new id, `completed = false`, `created_at`
    /// now, no `updated_at`.
    ///
    /// The caller is responsible for having trimmed and validated `text`.
    #[must_use]
    pub fn new(text: String, due_date: Option<DateTime<Utc>>, priority: Option<Priority>) -> Self {
        Self {
            id: TaskId::new(),
            text,
            completed: false,
            created_at: Utc::now(),
            updated_at: None,
            due_date,
            priority,
        }
    }
}
