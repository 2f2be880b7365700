//! Task record.

use super::{TaskStatus, User};
use crate::{TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task, as stored in the `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    /// Must reference an existing user.
    pub author_id: UserId,
    /// When present, must reference an existing user.
    pub assignee_id: Option<UserId>,
}

/// A task together with its eagerly loaded watcher and executor sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    #[serde(flatten)]
    pub task: Task,
    pub watchers: Vec<User>,
    pub executors: Vec<User>,
}

impl TaskDetails {
    /// Wraps a task that has no watchers or executors.
    #[must_use]
    pub const fn without_relations(task: Task) -> Self {
        Self {
            task,
            watchers: Vec::new(),
            executors: Vec::new(),
        }
    }
}
