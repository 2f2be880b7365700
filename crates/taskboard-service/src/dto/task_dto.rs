//! Task-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::patch::double_option;
use taskboard_core::{TaskDetails, TaskId, TaskStatus, UserId};
use taskboard_repository::{NewTask, TaskChanges, TaskFilter};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::UserResponse;

/// Request to create a task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTaskRequest {
    #[validate(length(min = 3, max = 255, message = "Title must be 3-255 characters"))]
    pub title: String,

    pub description: Option<String>,

    pub status: TaskStatus,

    pub author_id: UserId,

    pub assignee_id: Option<UserId>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(request: CreateTaskRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            status: request.status,
            author_id: request.author_id,
            assignee_id: request.assignee_id,
        }
    }
}

/// Partial update of a task.
///
/// Absent fields are left untouched. `description` and `assignee_id` may be
/// sent as `null` to clear them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "require_changes"))]
pub struct UpdateTaskRequest {
    #[validate(length(min = 3, max = 255, message = "Title must be 3-255 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,

    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<UserId>)]
    pub assignee_id: Option<Option<UserId>>,
}

impl UpdateTaskRequest {
    /// True when at least one field is present.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.status.is_some()
            || self.author_id.is_some()
            || self.assignee_id.is_some()
    }
}

fn require_changes(request: &UpdateTaskRequest) -> Result<(), ValidationError> {
    if request.has_changes() {
        return Ok(());
    }
    let mut error = ValidationError::new("empty_update");
    error.message = Some("At least one field must be provided".into());
    Err(error)
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(request: UpdateTaskRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            status: request.status,
            author_id: request.author_id,
            assignee_id: request.assignee_id,
        }
    }
}

/// Query parameters for listing tasks. Every parameter is optional and they
/// combine with `AND`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterTaskRequest {
    /// Case-insensitive substring of the title.
    #[validate(length(min = 3, max = 255, message = "Title must be 3-255 characters"))]
    pub title: Option<String>,

    pub status: Option<TaskStatus>,

    pub author_id: Option<UserId>,
}

impl From<FilterTaskRequest> for TaskFilter {
    fn from(request: FilterTaskRequest) -> Self {
        Self {
            title: request.title,
            status: request.status,
            author_id: request.author_id,
        }
    }
}

/// Task response DTO, with watchers and executors expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub author_id: UserId,
    pub assignee_id: Option<UserId>,
    pub watchers: Vec<UserResponse>,
    pub executors: Vec<UserResponse>,
}

impl From<TaskDetails> for TaskResponse {
    fn from(details: TaskDetails) -> Self {
        let task = details.task;
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            created_at: task.created_at,
            author_id: task.author_id,
            assignee_id: task.assignee_id,
            watchers: details.watchers.into_iter().map(UserResponse::from).collect(),
            executors: details.executors.into_iter().map(UserResponse::from).collect(),
        }
    }
}
