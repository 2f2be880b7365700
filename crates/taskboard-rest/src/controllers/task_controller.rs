//! Task controller.

use super::{parse_task_id, parse_user_id};
use crate::{
    extractors::{ValidatedJson, ValidatedQuery},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use taskboard_service::{CreateTaskRequest, FilterTaskRequest, TaskResponse, UpdateTaskRequest};
use tracing::debug;

/// Creates the task router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks/", get(list_tasks).post(create_task))
        .route(
            "/tasks/:id",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route(
            "/tasks/:id/watchers/:user_id",
            post(add_watcher).delete(remove_watcher),
        )
        .route(
            "/tasks/:id/executors/:user_id",
            post(add_executor).delete(remove_executor),
        )
}

/// List tasks, optionally filtered.
#[utoipa::path(
    get,
    path = "/tasks/",
    tag = "tasks",
    params(FilterTaskRequest),
    responses(
        (status = 200, description = "Matching tasks", body = [TaskResponse]),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    ValidatedQuery(filter): ValidatedQuery<FilterTaskRequest>,
) -> ApiResult<Vec<TaskResponse>> {
    debug!("List tasks request: {:?}", filter);

    let response = state.task_service.list_tasks(filter).await?;
    ok(response)
}

/// Create a task.
#[utoipa::path(
    post,
    path = "/tasks/",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Wrong data provided"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TaskResponse>>), AppError> {
    debug!("Create task request: {}", request.title);

    let response = state.task_service.create_task(request).await?;
    Ok(created(response))
}

/// Get a task with its watchers and executors.
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 404, description = "Task not found"),
        (status = 422, description = "Malformed ID")
    )
)]
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TaskResponse> {
    debug!("Get task request: {}", id);

    let task_id = parse_task_id(&id)?;
    let response = state.task_service.get_task(task_id).await?;
    ok(response)
}

/// Partially update a task.
#[utoipa::path(
    patch,
    path = "/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 400, description = "Wrong data provided"),
        (status = 404, description = "Task not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateTaskRequest>,
) -> ApiResult<TaskResponse> {
    debug!("Update task request: {}", id);

    let task_id = parse_task_id(&id)?;
    let response = state.task_service.update_task(task_id, request).await?;
    ok(response)
}

/// Delete a task.
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 422, description = "Malformed ID")
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete task request: {}", id);

    let task_id = parse_task_id(&id)?;
    state.task_service.delete_task(task_id).await?;
    Ok(no_content())
}

/// Add a watcher to a task.
#[utoipa::path(
    post,
    path = "/tasks/{id}/watchers/{user_id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID"),
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Watcher added", body = TaskResponse),
        (status = 400, description = "Wrong data provided")
    )
)]
pub async fn add_watcher(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> ApiResult<TaskResponse> {
    debug!("Add watcher request: {} -> {}", user_id, id);

    let response = state
        .task_service
        .add_watcher(parse_task_id(&id)?, parse_user_id(&user_id)?)
        .await?;
    ok(response)
}

/// Remove a watcher from a task.
#[utoipa::path(
    delete,
    path = "/tasks/{id}/watchers/{user_id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID"),
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Watcher removed", body = TaskResponse),
        (status = 404, description = "Task not found")
    )
)]
pub async fn remove_watcher(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> ApiResult<TaskResponse> {
    debug!("Remove watcher request: {} -> {}", user_id, id);

    let response = state
        .task_service
        .remove_watcher(parse_task_id(&id)?, parse_user_id(&user_id)?)
        .await?;
    ok(response)
}

/// Add an executor to a task.
#[utoipa::path(
    post,
    path = "/tasks/{id}/executors/{user_id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID"),
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Executor added", body = TaskResponse),
        (status = 400, description = "Wrong data provided")
    )
)]
pub async fn add_executor(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> ApiResult<TaskResponse> {
    debug!("Add executor request: {} -> {}", user_id, id);

    let response = state
        .task_service
        .add_executor(parse_task_id(&id)?, parse_user_id(&user_id)?)
        .await?;
    ok(response)
}

/// Remove an executor from a task.
#[utoipa::path(
    delete,
    path = "/tasks/{id}/executors/{user_id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID"),
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Executor removed", body = TaskResponse),
        (status = 404, description = "Task not found")
    )
)]
pub async fn remove_executor(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> ApiResult<TaskResponse> {
    debug!("Remove executor request: {} -> {}", user_id, id);

    let response = state
        .task_service
        .remove_executor(parse_task_id(&id)?, parse_user_id(&user_id)?)
        .await?;
    ok(response)
}
