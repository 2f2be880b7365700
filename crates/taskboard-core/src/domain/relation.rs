//! Join records for the many-to-many task/user associations.

use crate::{TaskId, UserId};
use serde::{Deserialize, Serialize};

/// A user watching a task. `(task_id, user_id)` is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Watcher {
    pub task_id: TaskId,
    pub user_id: UserId,
}

/// A user executing a task. `(task_id, user_id)` is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Executor {
    pub task_id: TaskId,
    pub user_id: UserId,
}
