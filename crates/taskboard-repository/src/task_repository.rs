//! Task repository.

use crate::entity::{Entity, Fields, MembershipColumn, TaskColumn};
use crate::error::{RepositoryError, TaskError};
use crate::sql_repository::SqlRepository;
use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use taskboard_core::{Executor, Task, TaskDetails, TaskId, TaskStatus, User, UserId, Watcher};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Values for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub author_id: UserId,
    pub assignee_id: Option<UserId>,
}

impl From<NewTask> for Fields<Task> {
    fn from(task: NewTask) -> Self {
        let mut fields = Self::new()
            .with(TaskColumn::Title, task.title)
            .with(TaskColumn::Status, task.status)
            .with(TaskColumn::AuthorId, task.author_id);
        if task.description.is_some() {
            fields.set(TaskColumn::Description, task.description);
        }
        if task.assignee_id.is_some() {
            fields.set(TaskColumn::AssigneeId, task.assignee_id);
        }
        fields
    }
}

/// Optional listing filters, combined with `AND`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub author_id: Option<UserId>,
}

/// Partial update of a task. `None` leaves the column untouched; for the
/// nullable columns `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub author_id: Option<UserId>,
    pub assignee_id: Option<Option<UserId>>,
}

impl TaskChanges {
    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.author_id.is_none()
            && self.assignee_id.is_none()
    }
}

impl From<TaskChanges> for Fields<Task> {
    fn from(changes: TaskChanges) -> Self {
        let mut fields = Self::new();
        if let Some(title) = changes.title {
            fields.set(TaskColumn::Title, title);
        }
        if let Some(description) = changes.description {
            fields.set(TaskColumn::Description, description);
        }
        if let Some(status) = changes.status {
            fields.set(TaskColumn::Status, status);
        }
        if let Some(author_id) = changes.author_id {
            fields.set(TaskColumn::AuthorId, author_id);
        }
        if let Some(assignee_id) = changes.assignee_id {
            fields.set(TaskColumn::AssigneeId, assignee_id);
        }
        fields
    }
}

/// A user row joined with the task it is related to.
#[derive(FromRow)]
struct RelatedUser {
    task_id: TaskId,
    #[sqlx(flatten)]
    user: User,
}

/// Repository for the `tasks` table and its watcher/executor join tables.
///
/// Derefs to the generic [`SqlRepository`] over [`Task`].
pub struct TaskRepository<'c> {
    repo: SqlRepository<'c, Task>,
}

impl<'c> TaskRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self {
            repo: SqlRepository::new(conn),
        }
    }

    /// Creates a task. A missing author or assignee fails with
    /// [`TaskError::Invalid`].
    pub async fn create_task(&mut self, task: NewTask) -> Result<Task, TaskError> {
        debug!("Creating task '{}' for author {}", task.title, task.author_id);
        let created = self
            .repo
            .add_one_and_get_obj(task.into())
            .await
            .map_err(|e| {
                warn!("Task creation rejected: {}", e);
                TaskError::from(e)
            })?;
        info!("Task created: {}", created.id);
        Ok(created)
    }

    /// Lists tasks matching every present filter, with watchers and
    /// executors loaded.
    pub async fn get_all(&mut self, filter: TaskFilter) -> Result<Vec<TaskDetails>, TaskError> {
        debug!("Listing tasks with filter: {:?}", filter);
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {}",
            Task::column_list(),
            Task::TABLE
        ));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at, id");

        let tasks = qb
            .build_query_as::<Task>()
            .fetch_all(self.repo.connection())
            .await
            .map_err(RepositoryError::from)?;
        self.load_relations(tasks).await
    }

    /// Fetches one task with watchers and executors loaded.
    pub async fn get_by_id(&mut self, id: TaskId) -> Result<Option<TaskDetails>, TaskError> {
        debug!("Finding task by id: {}", id);
        let task = self
            .repo
            .get_by_filter_one_or_none(Fields::new().with(TaskColumn::Id, id))
            .await?;
        match task {
            Some(task) => Ok(self.load_relations(vec![task]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Applies only the fields present in `changes`.
    ///
    /// Fails with [`TaskError::NoTask`] when the task does not exist and
    /// with [`TaskError::Invalid`] when a new author or assignee does not
    /// exist.
    pub async fn update(&mut self, id: TaskId, changes: TaskChanges) -> Result<Task, TaskError> {
        debug!("Updating task {}: {:?}", id, changes);
        let updated = self
            .repo
            .update_one_by_id(id, changes.into())
            .await
            .map_err(|e| {
                warn!("Task update rejected: {}", e);
                TaskError::from(e)
            })?
            .ok_or(TaskError::NoTask(id))?;
        info!("Task updated: {}", id);
        Ok(updated)
    }

    /// Deletes a task and its join rows. Returns whether a row was removed.
    pub async fn delete_by_id(&mut self, id: TaskId) -> Result<bool, TaskError> {
        debug!("Deleting task: {}", id);
        let removed = self
            .repo
            .delete_by_filter(Fields::new().with(TaskColumn::Id, id))
            .await?;
        Ok(removed > 0)
    }

    pub async fn add_watcher(&mut self, task_id: TaskId, user_id: UserId) -> Result<(), TaskError> {
        debug!("Adding watcher {} to task {}", user_id, task_id);
        self.memberships::<Watcher>()
            .add_one(membership(task_id, user_id))
            .await?;
        Ok(())
    }

    pub async fn remove_watcher(&mut self, task_id: TaskId, user_id: UserId) -> Result<bool, TaskError> {
        debug!("Removing watcher {} from task {}", user_id, task_id);
        let removed = self
            .memberships::<Watcher>()
            .delete_by_filter(membership(task_id, user_id))
            .await?;
        Ok(removed > 0)
    }

    pub async fn add_executor(&mut self, task_id: TaskId, user_id: UserId) -> Result<(), TaskError> {
        debug!("Adding executor {} to task {}", user_id, task_id);
        self.memberships::<Executor>()
            .add_one(membership(task_id, user_id))
            .await?;
        Ok(())
    }

    pub async fn remove_executor(&mut self, task_id: TaskId, user_id: UserId) -> Result<bool, TaskError> {
        debug!("Removing executor {} from task {}", user_id, task_id);
        let removed = self
            .memberships::<Executor>()
            .delete_by_filter(membership(task_id, user_id))
            .await?;
        Ok(removed > 0)
    }

    fn memberships<M: Entity<Column = MembershipColumn>>(&mut self) -> SqlRepository<'_, M> {
        SqlRepository::new(self.repo.connection())
    }

    /// Loads watcher and executor sets with one query per relation.
    async fn load_relations(&mut self, tasks: Vec<Task>) -> Result<Vec<TaskDetails>, TaskError> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = tasks.iter().map(|t| t.id.into_inner()).collect();
        let mut watchers = self.related_users(Watcher::TABLE, &ids).await?;
        let mut executors = self.related_users(Executor::TABLE, &ids).await?;

        Ok(tasks
            .into_iter()
            .map(|task| TaskDetails {
                watchers: watchers.remove(&task.id).unwrap_or_default(),
                executors: executors.remove(&task.id).unwrap_or_default(),
                task,
            })
            .collect())
    }

    async fn related_users(
        &mut self,
        join_table: &str,
        task_ids: &[Uuid],
    ) -> Result<HashMap<TaskId, Vec<User>>, TaskError> {
        let rows = sqlx::query_as::<_, RelatedUser>(&format!(
            "SELECT r.task_id, u.id, u.full_name, u.email, u.created_at \
             FROM {join_table} r JOIN users u ON u.id = r.user_id \
             WHERE r.task_id = ANY($1) ORDER BY u.created_at, u.id"
        ))
        .bind(task_ids)
        .fetch_all(self.repo.connection())
        .await
        .map_err(RepositoryError::from)?;

        let mut grouped: HashMap<TaskId, Vec<User>> = HashMap::new();
        for row in rows {
            grouped.entry(row.task_id).or_default().push(row.user);
        }
        Ok(grouped)
    }
}

impl<'c> Deref for TaskRepository<'c> {
    type Target = SqlRepository<'c, Task>;

    fn deref(&self) -> &Self::Target {
        &self.repo
    }
}

impl DerefMut for TaskRepository<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.repo
    }
}

fn membership<M: Entity<Column = MembershipColumn>>(task_id: TaskId, user_id: UserId) -> Fields<M> {
    Fields::new()
        .with(MembershipColumn::TaskId, task_id)
        .with(MembershipColumn::UserId, user_id)
}

/// Escapes `LIKE` wildcards so the title filter matches literally.
fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: TaskFilter) {
    let mut clause = " WHERE ";
    if let Some(title) = filter.title {
        qb.push(clause)
            .push("title ILIKE ")
            .push_bind(format!("%{}%", escape_like(&title)));
        clause = " AND ";
    }
    if let Some(status) = filter.status {
        qb.push(clause).push("status = ").push_bind(status);
        clause = " AND ";
    }
    if let Some(author_id) = filter.author_id {
        qb.push(clause).push("author_id = ").push_bind(author_id.into_inner());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::SqlValue;

    fn filter_sql(filter: TaskFilter) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id FROM tasks");
        push_filter(&mut qb, filter);
        qb.sql().to_string()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert_eq!(filter_sql(TaskFilter::default()), "SELECT id FROM tasks");
    }

    #[test]
    fn test_filters_compose_with_and() {
        let sql = filter_sql(TaskFilter {
            title: Some("fir".to_string()),
            status: Some(TaskStatus::Todo),
            author_id: Some(UserId::new()),
        });
        assert_eq!(
            sql,
            "SELECT id FROM tasks WHERE title ILIKE $1 AND status = $2 AND author_id = $3"
        );
    }

    #[test]
    fn test_single_filter_has_no_dangling_and() {
        let sql = filter_sql(TaskFilter {
            author_id: Some(UserId::new()),
            ..TaskFilter::default()
        });
        assert_eq!(sql, "SELECT id FROM tasks WHERE author_id = $1");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%_done\\"), "100\\%\\_done\\\\");
    }

    #[test]
    fn test_changes_only_touch_present_fields() {
        let fields: Fields<Task> = TaskChanges {
            status: Some(TaskStatus::InProgress),
            ..TaskChanges::default()
        }
        .into();
        assert_eq!(fields.columns().collect::<Vec<_>>(), vec!["status"]);
    }

    #[test]
    fn test_changes_can_clear_nullable_fields() {
        let fields: Fields<Task> = TaskChanges {
            description: Some(None),
            assignee_id: Some(None),
            ..TaskChanges::default()
        }
        .into();
        assert_eq!(
            fields.get(TaskColumn::Description),
            Some(&SqlValue::NullableText(None))
        );
        assert_eq!(
            fields.get(TaskColumn::AssigneeId),
            Some(&SqlValue::NullableUuid(None))
        );
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(TaskChanges::default().is_empty());
        assert!(!TaskChanges {
            title: Some("abc".to_string()),
            ..TaskChanges::default()
        }
        .is_empty());
    }

    #[test]
    fn test_new_task_omits_absent_optional_columns() {
        let fields: Fields<Task> = NewTask {
            title: "First".to_string(),
            description: None,
            status: TaskStatus::Todo,
            author_id: UserId::new(),
            assignee_id: None,
        }
        .into();
        assert_eq!(
            fields.columns().collect::<Vec<_>>(),
            vec!["title", "status", "author_id"]
        );
    }
}
