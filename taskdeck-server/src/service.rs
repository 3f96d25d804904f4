//! Task service core: router, request handlers, and server startup.
//!
//! Four stateless handlers translate HTTP verbs into [`TaskStore`]
//! operations. Input validation (required text) and response shaping live
//! here; the store owns persistence and `updated_at` stamping. All four
//! operations are independent, single-document, non-transactional.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use taskdeck_proto::task::{Task, TaskId};
use taskdeck_proto::wire::{CreateTask, DeleteResponse, Health, TaskDto, UpdateTask};

use crate::error::ApiError;
use crate::store::{MemoryStore, TaskStore};

/// Builds the service router over any [`TaskStore`].
///
/// Routes are mounted exactly as the REST surface documents them; CORS is
/// permissive (the browser client is served from another origin) and every
/// request is traced.
pub fn router<S: TaskStore + 'static>(store: Arc<S>) -> Router {
    Router::new()
        .route("/todos", get(list_tasks::<S>).post(create_task::<S>))
        .route(
            "/todos/{id}",
            put(update_task::<S>).delete(delete_task::<S>),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// `GET /todos` — all tasks, newest first.
async fn list_tasks<S: TaskStore>(
    State(store): State<Arc<S>>,
) -> Result<Json<Vec<TaskDto>>, ApiError> {
    let tasks = store.list().await?;
    Ok(Json(tasks.into_iter().map(TaskDto::from).collect()))
}

/// `POST /todos` — create a task from `text` plus optional due date and
/// priority.
async fn create_task<S: TaskStore>(
    State(store): State<Arc<S>>,
    Json(req): Json<CreateTask>,
) -> Result<impl IntoResponse, ApiError> {
    let text = req.text.as_deref().unwrap_or_default().trim();
    if text.is_empty() {
        return Err(ApiError::Validation("text is required".to_string()));
    }

    let task = Task::new(text.to_string(), req.due_date, req.priority);
    let stored = store.insert(task).await?;

    tracing::info!(id = %stored.id, "task created");
    Ok((StatusCode::CREATED, Json(TaskDto::from(stored))))
}

/// `PUT /todos/{id}` — partial update; only fields present in the body
/// change.
async fn update_task<S: TaskStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<TaskId>,
    Json(mut req): Json<UpdateTask>,
) -> Result<Json<TaskDto>, ApiError> {
    if let Some(text) = req.text.take() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ApiError::Validation("text cannot be empty".to_string()));
        }
        req.text = Some(trimmed.to_string());
    }

    let updated = store.update(&id, req).await?.ok_or(ApiError::NotFound)?;

    tracing::info!(id = %updated.id, "task updated");
    Ok(Json(TaskDto::from(updated)))
}

/// `DELETE /todos/{id}` — remove a task, returning its prior state.
async fn delete_task<S: TaskStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<TaskId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = store.remove(&id).await?.ok_or(ApiError::NotFound)?;

    tracing::info!(id = %deleted.id, "task deleted");
    Ok(Json(DeleteResponse {
        message: "task deleted".to_string(),
        deleted_task: TaskDto::from(deleted),
    }))
}

/// `GET /health` — deployment readiness only, not part of the task
/// contract.
async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

/// Starts the service on the given address with a fresh [`MemoryStore`],
/// returning the bound address and a join handle.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_store(addr, Arc::new(MemoryStore::new())).await
}

/// Starts the service with a caller-provided store.
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_store<S: TaskStore + 'static>(
    addr: &str,
    store: Arc<S>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(store);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task service error");
        }
    });

    Ok((bound_addr, handle))
}
