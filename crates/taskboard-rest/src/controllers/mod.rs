//! REST API controllers.

pub mod health_controller;
pub mod task_controller;
pub mod user_controller;

pub use health_controller::*;

use crate::responses::AppError;
use taskboard_core::{TaskId, TaskboardError, UserId};

/// Parses a user ID path segment. A malformed ID is a validation error.
pub(crate) fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id)
        .map_err(|_| AppError(TaskboardError::validation(format!("Invalid user ID: {id}"))))
}

/// Parses a task ID path segment. A malformed ID is a validation error.
pub(crate) fn parse_task_id(id: &str) -> Result<TaskId, AppError> {
    TaskId::parse(id)
        .map_err(|_| AppError(TaskboardError::validation(format!("Invalid task ID: {id}"))))
}
