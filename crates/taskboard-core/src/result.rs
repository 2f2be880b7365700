//! Result type aliases for Taskboard.

use crate::TaskboardError;

/// A specialized `Result` type for Taskboard service operations.
pub type TaskboardResult<T> = Result<T, TaskboardError>;
