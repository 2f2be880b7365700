//! Task service implementation.

use crate::dto::{CreateTaskRequest, FilterTaskRequest, TaskResponse, UpdateTaskRequest};
use crate::errors::{messages, task_error};
use crate::task_service::TaskService;
use async_trait::async_trait;
use taskboard_core::{TaskDetails, TaskId, TaskboardError, TaskboardResult, UserId, ValidateExt};
use taskboard_repository::{NewTask, TaskChanges, TaskFilter, UnitOfWork, UnitOfWorkFactory};
use tracing::{debug, info};

/// Task service backed by one unit of work per call.
#[derive(Clone, Debug)]
pub struct TaskServiceImpl {
    uow: UnitOfWorkFactory,
}

impl TaskServiceImpl {
    /// Creates a new task service.
    #[must_use]
    pub const fn new(uow: UnitOfWorkFactory) -> Self {
        Self { uow }
    }
}

/// Re-reads a task inside the current unit of work.
async fn reload(uow: &mut UnitOfWork, id: TaskId) -> TaskboardResult<TaskDetails> {
    uow.tasks()
        .get_by_id(id)
        .await
        .map_err(task_error)?
        .ok_or_else(|| TaskboardError::not_found(messages::TASK_NOT_FOUND))
}

#[async_trait]
impl TaskService for TaskServiceImpl {
    async fn create_task(&self, request: CreateTaskRequest) -> TaskboardResult<TaskResponse> {
        debug!("Creating task: {}", request.title);
        request.validate_request()?;

        let new_task = NewTask::from(request);
        let task = self
            .uow
            .run(move |uow| {
                Box::pin(async move { uow.tasks().create_task(new_task).await.map_err(task_error) })
            })
            .await?;

        info!("Task created: {}", task.id);
        Ok(TaskResponse::from(TaskDetails::without_relations(task)))
    }

    async fn list_tasks(&self, filter: FilterTaskRequest) -> TaskboardResult<Vec<TaskResponse>> {
        debug!("Listing tasks: {:?}", filter);
        filter.validate_request()?;

        let filter = TaskFilter::from(filter);
        let tasks = self
            .uow
            .run(move |uow| {
                Box::pin(async move { uow.tasks().get_all(filter).await.map_err(task_error) })
            })
            .await?;

        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    async fn get_task(&self, id: TaskId) -> TaskboardResult<TaskResponse> {
        debug!("Getting task: {}", id);
        let details = self
            .uow
            .run(move |uow| Box::pin(async move { reload(uow, id).await }))
            .await?;

        Ok(TaskResponse::from(details))
    }

    async fn update_task(&self, id: TaskId, request: UpdateTaskRequest) -> TaskboardResult<TaskResponse> {
        debug!("Updating task: {}", id);
        request.validate_request()?;

        let changes = TaskChanges::from(request);
        let details = self
            .uow
            .run(move |uow| {
                Box::pin(async move {
                    uow.tasks().update(id, changes).await.map_err(task_error)?;
                    reload(uow, id).await
                })
            })
            .await?;

        info!("Task updated: {}", id);
        Ok(TaskResponse::from(details))
    }

    async fn delete_task(&self, id: TaskId) -> TaskboardResult<()> {
        debug!("Deleting task: {}", id);
        let removed = self
            .uow
            .run(move |uow| {
                Box::pin(async move { uow.tasks().delete_by_id(id).await.map_err(task_error) })
            })
            .await?;

        if removed {
            info!("Task deleted: {}", id);
        }
        Ok(())
    }

    async fn add_watcher(&self, task_id: TaskId, user_id: UserId) -> TaskboardResult<TaskResponse> {
        debug!("Adding watcher {} to task {}", user_id, task_id);
        let details = self
            .uow
            .run(move |uow| {
                Box::pin(async move {
                    uow.tasks()
                        .add_watcher(task_id, user_id)
                        .await
                        .map_err(task_error)?;
                    reload(uow, task_id).await
                })
            })
            .await?;

        Ok(TaskResponse::from(details))
    }

    async fn remove_watcher(&self, task_id: TaskId, user_id: UserId) -> TaskboardResult<TaskResponse> {
        debug!("Removing watcher {} from task {}", user_id, task_id);
        let details = self
            .uow
            .run(move |uow| {
                Box::pin(async move {
                    uow.tasks()
                        .remove_watcher(task_id, user_id)
                        .await
                        .map_err(task_error)?;
                    reload(uow, task_id).await
                })
            })
            .await?;

        Ok(TaskResponse::from(details))
    }

    async fn add_executor(&self, task_id: TaskId, user_id: UserId) -> TaskboardResult<TaskResponse> {
        debug!("Adding executor {} to task {}", user_id, task_id);
        let details = self
            .uow
            .run(move |uow| {
                Box::pin(async move {
                    uow.tasks()
                        .add_executor(task_id, user_id)
                        .await
                        .map_err(task_error)?;
                    reload(uow, task_id).await
                })
            })
            .await?;

        Ok(TaskResponse::from(details))
    }

    async fn remove_executor(&self, task_id: TaskId, user_id: UserId) -> TaskboardResult<TaskResponse> {
        debug!("Removing executor {} from task {}", user_id, task_id);
        let details = self
            .uow
            .run(move |uow| {
                Box::pin(async move {
                    uow.tasks()
                        .remove_executor(task_id, user_id)
                        .await
                        .map_err(task_error)?;
                    reload(uow, task_id).await
                })
            })
            .await?;

        Ok(TaskResponse::from(details))
    }
}
