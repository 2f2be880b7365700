//! Narrowing of repository errors into caller-facing categories.

use taskboard_core::TaskboardError;
use taskboard_repository::{TaskError, UserError};
use tracing::{error, warn};

/// User-facing messages.
pub mod messages {
    pub const TASK_NOT_FOUND: &str = "Task not found.";
    pub const USER_NOT_FOUND: &str = "User not found.";
    pub const WRONG_TASK_DATA: &str = "Wrong data provided.";
    pub const CREATE_USER_FAILED: &str = "Email already exists or invalid data provided.";
}

pub(crate) fn task_error(err: TaskError) -> TaskboardError {
    match err {
        TaskError::Invalid(detail) => {
            warn!("Rejected task data: {}", detail);
            TaskboardError::invalid_input(messages::WRONG_TASK_DATA)
        }
        TaskError::NoTask(id) => {
            warn!("Task does not exist: {}", id);
            TaskboardError::not_found(messages::TASK_NOT_FOUND)
        }
        TaskError::Storage(detail) => {
            error!("Task storage failure: {}", detail);
            TaskboardError::database(detail)
        }
    }
}

pub(crate) fn user_error(err: UserError) -> TaskboardError {
    match err {
        UserError::Create(detail) => {
            warn!("Rejected user data: {}", detail);
            TaskboardError::invalid_input(messages::CREATE_USER_FAILED)
        }
        UserError::Storage(detail) => {
            error!("User storage failure: {}", detail);
            TaskboardError::database(detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::TaskId;

    #[test]
    fn test_task_errors_map_to_categories() {
        let invalid = task_error(TaskError::Invalid("fk violation".to_string()));
        assert_eq!(invalid.status_code(), 400);
        assert_eq!(invalid.to_string(), messages::WRONG_TASK_DATA);

        let missing = task_error(TaskError::NoTask(TaskId::new()));
        assert_eq!(missing.status_code(), 404);
        assert_eq!(missing.to_string(), messages::TASK_NOT_FOUND);

        let storage = task_error(TaskError::Storage("connection reset".to_string()));
        assert_eq!(storage.status_code(), 500);
    }

    #[test]
    fn test_user_errors_map_to_categories() {
        let duplicate = user_error(UserError::Create("duplicate key".to_string()));
        assert_eq!(duplicate.status_code(), 400);
        assert_eq!(duplicate.to_string(), messages::CREATE_USER_FAILED);

        let storage = user_error(UserError::Storage("pool timed out".to_string()));
        assert_eq!(storage.status_code(), 500);
    }

    #[test]
    fn test_driver_detail_is_not_exposed_for_client_errors() {
        let err = task_error(TaskError::Invalid(
            "insert or update on table \"tasks\" violates foreign key constraint".to_string(),
        ));
        assert!(!err.to_string().contains("foreign key"));
    }
}
