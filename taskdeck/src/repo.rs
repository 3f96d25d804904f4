//! HTTP adapter over the task service.
//!
//! [`TaskRepository`] wraps the four REST operations as async calls and
//! translates wire representations into the client's task type: the store
//! identifier field is remapped to `id` and timestamps are parsed into
//! native dates (both via [`taskdeck_proto::wire::TaskDto`]). Any
//! non-success outcome — transport failure or error status — surfaces as a
//! [`RepoError::FetchFailed`] naming the attempted operation. There is no
//! retry; failures propagate to the caller unchanged.

use std::time::Duration;

use taskdeck_proto::task::{Priority, Task, TaskId};
use taskdeck_proto::wire::{CreateTask, DeleteResponse, ErrorBody, TaskDto, UpdateTask};

/// Errors surfaced by repository calls.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The HTTP client could not be constructed.
    #[error("failed to initialize http client: {0}")]
    Client(String),

    /// A call to the task service did not complete successfully.
    #[error("failed to {op}: {reason}")]
    FetchFailed {
        /// The attempted operation, e.g. `"create task"`.
        op: &'static str,
        /// Transport error or server status description.
        reason: String,
    },
}

/// Asynchronous client for the task service REST surface.
pub struct TaskRepository {
    base_url: String,
    client: reqwest::Client,
}

impl TaskRepository {
    /// Creates a repository against `base_url` (e.g. `http://localhost:5000`)
    /// with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::Client`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RepoError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepoError::Client(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// `GET /todos` — the full list, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::FetchFailed`] on any non-success outcome.
    pub async fn list(&self) -> Result<Vec<Task>, RepoError> {
        let op = "fetch tasks";
        let resp = self
            .send(op, self.client.get(format!("{}/todos", self.base_url)))
            .await?;
        let dtos: Vec<TaskDto> = Self::parse(op, resp).await?;
        Ok(dtos.into_iter().map(Task::from).collect())
    }

    /// `POST /todos` — create a task.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::FetchFailed`] on any non-success outcome.
    pub async fn create(
        &self,
        text: &str,
        due_date: Option<chrono::DateTime<chrono::Utc>>,
        priority: Option<Priority>,
    ) -> Result<Task, RepoError> {
        let op = "create task";
        let body = CreateTask {
            text: Some(text.to_string()),
            due_date,
            priority,
        };
        let resp = self
            .send(
                op,
                self.client
                    .post(format!("{}/todos", self.base_url))
                    .json(&body),
            )
            .await?;
        let dto: TaskDto = Self::parse(op, resp).await?;
        Ok(Task::from(dto))
    }

    /// `PUT /todos/{id}` — partial update.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::FetchFailed`] on any non-success outcome.
    pub async fn update(&self, id: &TaskId, changes: UpdateTask) -> Result<Task, RepoError> {
        let op = "update task";
        let resp = self
            .send(
                op,
                self.client
                    .put(format!("{}/todos/{id}", self.base_url))
                    .json(&changes),
            )
            .await?;
        let dto: TaskDto = Self::parse(op, resp).await?;
        Ok(Task::from(dto))
    }

    /// `DELETE /todos/{id}` — delete, returning the task's prior state.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::FetchFailed`] on any non-success outcome.
    pub async fn delete(&self, id: &TaskId) -> Result<Task, RepoError> {
        let op = "delete task";
        let resp = self
            .send(
                op,
                self.client.delete(format!("{}/todos/{id}", self.base_url)),
            )
            .await?;
        let body: DeleteResponse = Self::parse(op, resp).await?;
        Ok(Task::from(body.deleted_task))
    }

    /// Sends a request, turning transport errors and error statuses into
    /// [`RepoError::FetchFailed`].
    async fn send(
        &self,
        op: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, RepoError> {
        let resp = request
            .send()
            .await
            .map_err(|e| RepoError::FetchFailed {
                op,
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        // Carry the server's message when the error body parses.
        let reason = match resp.json::<ErrorBody>().await {
            Ok(body) => format!("server returned {status}: {}", body.message),
            Err(_) => format!("server returned {status}"),
        };
        Err(RepoError::FetchFailed { op, reason })
    }

    /// Parses a success response body, mapping decode failures to
    /// [`RepoError::FetchFailed`].
    async fn parse<T: serde::de::DeserializeOwned>(
        op: &'static str,
        resp: reqwest::Response,
    ) -> Result<T, RepoError> {
        resp.json().await.map_err(|e| RepoError::FetchFailed {
            op,
            reason: format!("invalid response body: {e}"),
        })
    }
}
