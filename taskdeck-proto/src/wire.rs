//! JSON wire representations for the REST surface.
//!
//! The store's document format differs from the in-memory model in two
//! ways: the identifier travels under the `_id` field name, and all
//! timestamps are RFC 3339 strings. [`TaskDto`] captures that shape; the
//! client adapter converts back to [`Task`] (id remap, date parsing handled
//! by serde). Request payloads ([`CreateTask`], [`UpdateTask`]) live here
//! too so server and client agree on them by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task, TaskId};

/// Wire form of a [`Task`]: camelCase fields, identifier under `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    /// Store identifier field, remapped to `id` internally.
    #[serde(rename = "_id")]
    pub id: TaskId,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp (RFC 3339 on the wire).
    pub created_at: DateTime<Utc>,
    /// Last-mutation timestamp, omitted until the first update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Optional due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Optional priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            text: task.text,
            completed: task.completed,
            created_at: task.created_at,
            updated_at: task.updated_at,
            due_date: task.due_date,
            priority: task.priority,
        }
    }
}

impl From<TaskDto> for Task {
    fn from(dto: TaskDto) -> Self {
        Self {
            id: dto.id,
            text: dto.text,
            completed: dto.completed,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
            due_date: dto.due_date,
            priority: dto.priority,
        }
    }
}

/// Body of `POST /todos`.
///
/// `text` is optional at the serde level so that a missing field reaches
/// the handler's validation (client-error response) instead of being
/// rejected as a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    /// The task text. Required, non-empty after trimming.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Optional due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Optional priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// Body of `PUT /todos/{id}` — one optional per mutable attribute.
///
/// For `due_date` and `priority` the outer `Option` distinguishes "field
/// absent" (leave unchanged) from "field present" — and the inner `Option`
/// carries an explicit JSON `null` meaning "clear the field".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    /// New text, trimmed by the server. Absent = unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New completion flag. Absent = unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// Absent = unchanged; `null` = clear; value = set.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Absent = unchanged; `null` = clear; value = set.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Option<Priority>>,
}

/// Body of a successful `DELETE /todos/{id}`: confirmation plus the
/// deleted task's prior state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The task as it was just before deletion.
    pub deleted_task: TaskDto,
}

/// Error body returned by every non-success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// What went wrong.
    pub message: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Fixed `"ok"` indicator.
    pub status: String,
}

/// Deserializes a field so that a present-but-`null` value becomes
/// `Some(None)` while an absent field stays `None` (via `default`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
