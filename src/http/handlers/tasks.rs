//! Task CRUD handlers.

use crate::auth::ports::UserRepository;
use crate::http::{ApiError, AppState, Authenticated};
use crate::task::{
    domain::{Task, TaskDraft, TaskId, TaskPatch},
    ports::TaskRepository,
    services::TaskServiceError,
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mockable::Clock;
use serde_json::{Value, json};

/// Creates a task. Non-admins always create tasks assigned to themselves.
///
/// # Errors
///
/// Returns `400` when the draft is invalid.
pub async fn create<T, U, C>(
    State(state): State<AppState<T, U, C>>,
    Authenticated(principal): Authenticated,
    payload: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    let Json(draft) = payload?;
    let task = state.tasks.create(draft, &principal).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Lists the tasks visible to the caller, or `204` when no task has ever
/// been stored.
///
/// # Errors
///
/// Returns `500` when storage fails.
pub async fn list<T, U, C>(
    State(state): State<AppState<T, U, C>>,
    Authenticated(principal): Authenticated,
) -> Result<Response, ApiError>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    match state.tasks.fetch_all(&principal).await {
        Ok(tasks) => Ok(Json(tasks).into_response()),
        Err(TaskServiceError::NotFound) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(err) => Err(err.into()),
    }
}

/// Returns one task.
///
/// # Errors
///
/// Returns `404` when the task is missing and `403` when the caller may not
/// see it.
pub async fn fetch<T, U, C>(
    State(state): State<AppState<T, U, C>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    let task = state
        .tasks
        .fetch_by_id(&TaskId::new(id), &principal)
        .await?;
    Ok(Json(task))
}

/// Applies a partial update to a task.
///
/// # Errors
///
/// Returns `404`, `403`, or `400` for a missing task, a denied caller, or a
/// merged task that fails validation.
pub async fn update<T, U, C>(
    State(state): State<AppState<T, U, C>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Task>, ApiError>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    let Json(patch) = payload?;
    let task = state
        .tasks
        .update(&TaskId::new(id), patch, &principal)
        .await?;
    Ok(Json(task))
}

/// Deletes a task. Restricted to admins.
///
/// # Errors
///
/// Returns `403` for non-admin callers and `404` when the task is missing.
pub async fn remove<T, U, C>(
    State(state): State<AppState<T, U, C>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    if !principal.is_admin() {
        return Err(ApiError::Forbidden);
    }
    state.tasks.delete(&TaskId::new(id), &principal).await?;
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}
