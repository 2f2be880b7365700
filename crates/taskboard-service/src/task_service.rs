//! Task service trait definition.

use crate::dto::{CreateTaskRequest, FilterTaskRequest, TaskResponse, UpdateTaskRequest};
use async_trait::async_trait;
use taskboard_core::{TaskId, TaskboardResult, UserId};

/// Task service trait.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Creates a task. Unknown author or assignee is rejected as wrong data.
    async fn create_task(&self, request: CreateTaskRequest) -> TaskboardResult<TaskResponse>;

    /// Lists tasks matching every given filter, oldest first.
    async fn list_tasks(&self, filter: FilterTaskRequest) -> TaskboardResult<Vec<TaskResponse>>;

    /// Gets a task with its watchers and executors.
    async fn get_task(&self, id: TaskId) -> TaskboardResult<TaskResponse>;

    /// Applies a partial update and returns the updated task.
    async fn update_task(&self, id: TaskId, request: UpdateTaskRequest) -> TaskboardResult<TaskResponse>;

    /// Deletes a task. Deleting a missing task succeeds.
    async fn delete_task(&self, id: TaskId) -> TaskboardResult<()>;

    /// Adds a watcher and returns the task.
    async fn add_watcher(&self, task_id: TaskId, user_id: UserId) -> TaskboardResult<TaskResponse>;

    /// Removes a watcher and returns the task.
    async fn remove_watcher(&self, task_id: TaskId, user_id: UserId) -> TaskboardResult<TaskResponse>;

    /// Adds an executor and returns the task.
    async fn add_executor(&self, task_id: TaskId, user_id: UserId) -> TaskboardResult<TaskResponse>;

    /// Removes an executor and returns the task.
    async fn remove_executor(&self, task_id: TaskId, user_id: UserId) -> TaskboardResult<TaskResponse>;
}
