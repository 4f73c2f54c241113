use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Task;
use crate::database::repository::TaskRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// GET /api/tasks - list the caller's tasks, newest first
pub async fn task_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let repo = TaskRepository::scoped(state.pool.clone(), user.user_id);
    let tasks = repo.list().await?;

    Ok(Json(tasks))
}

/// POST /api/tasks - create a task owned by the caller
///
/// Any client-supplied owner or completed field is ignored; the owner comes
/// from the verified token and completed always starts false.
pub async fn task_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let title = payload
        .title
        .ok_or_else(|| ApiError::bad_request("title is required"))?;

    let repo = TaskRepository::scoped(state.pool.clone(), user.user_id);
    let task = repo.create(&title).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/:id - update title and completed on the caller's task
pub async fn task_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let title = payload
        .title
        .ok_or_else(|| ApiError::bad_request("title is required"))?;
    let completed = payload
        .completed
        .ok_or_else(|| ApiError::bad_request("completed is required"))?;

    let repo = TaskRepository::scoped(state.pool.clone(), user.user_id);
    let task = repo.update(id, &title, completed).await?;

    Ok(Json(task))
}

/// DELETE /api/tasks/:id - delete the caller's task
pub async fn task_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let repo = TaskRepository::scoped(state.pool.clone(), user.user_id);
    repo.delete(id).await?;

    Ok(Json(json!({ "message": "task deleted", "id": id })))
}
