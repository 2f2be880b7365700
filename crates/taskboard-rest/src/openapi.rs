//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use taskboard_core::{ErrorResponse, FieldError, TaskId, TaskStatus, UserId};
use taskboard_service::{
    CreateTaskRequest, CreateUserRequest, FilterTaskRequest, TaskResponse, UpdateTaskRequest,
    UserResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Taskboard API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskboard API",
        version = "1.0.0",
        description = "Users and tasks with watchers and executors",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::delete_user,
        // Task endpoints
        crate::controllers::task_controller::list_tasks,
        crate::controllers::task_controller::create_task,
        crate::controllers::task_controller::get_task,
        crate::controllers::task_controller::update_task,
        crate::controllers::task_controller::delete_task,
        crate::controllers::task_controller::add_watcher,
        crate::controllers::task_controller::remove_watcher,
        crate::controllers::task_controller::add_executor,
        crate::controllers::task_controller::remove_executor,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            TaskId,
            TaskStatus,
            ErrorResponse,
            FieldError,
            CreateUserRequest,
            UserResponse,
            CreateTaskRequest,
            UpdateTaskRequest,
            FilterTaskRequest,
            TaskResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "users", description = "User management"),
        (name = "tasks", description = "Tasks, watchers and executors"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;
