//! Integration tests for the unit of work.
//!
//! Requires Docker: `cargo test -p taskboard-repository -- --ignored`.

mod common;

use common::{new_task, new_user, TestDatabase};
use taskboard_core::{TaskStatus, User};
use taskboard_repository::{Fields, RepositoryError, TaskError, UserColumn};

#[derive(Debug)]
enum ScenarioError {
    Repository(RepositoryError),
    Task(TaskError),
    Aborted,
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<RepositoryError> for ScenarioError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}

impl From<TaskError> for ScenarioError {
    fn from(err: TaskError) -> Self {
        Self::Task(err)
    }
}

async fn count_users(db: &TestDatabase) -> usize {
    let mut uow = db.factory().begin().await.unwrap();
    let count = uow
        .repository::<User>()
        .get_by_filter_all(Fields::new())
        .await
        .unwrap()
        .len();
    uow.rollback().await.unwrap();
    count
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_run_commits_on_success() {
    let db = TestDatabase::new().await;

    let user = db
        .factory()
        .run(|uow| {
            Box::pin(async move {
                let user = uow
                    .users()
                    .create_user(new_user("First", "first@first.com"))
                    .await
                    .map_err(|e| RepositoryError::Integrity(e.to_string()))?;
                Ok::<_, RepositoryError>(user)
            })
        })
        .await
        .unwrap();

    assert_eq!(user.full_name, "First");
    assert_eq!(count_users(&db).await, 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_run_rolls_back_every_step_on_failure() {
    let db = TestDatabase::new().await;

    let result = db
        .factory()
        .run(|uow| {
            Box::pin(async move {
                let author = uow
                    .users()
                    .create_user(new_user("First", "first@first.com"))
                    .await
                    .map_err(|_| ScenarioError::Aborted)?;
                uow.tasks()
                    .create_task(new_task("First", TaskStatus::Todo, author.id))
                    .await?;
                Err::<(), _>(ScenarioError::Aborted)
            })
        })
        .await;

    assert!(matches!(result, Err(ScenarioError::Aborted)));
    assert_eq!(count_users(&db).await, 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_dropped_unit_of_work_rolls_back() {
    let db = TestDatabase::new().await;

    {
        let mut uow = db.factory().begin().await.unwrap();
        uow.users()
            .create_user(new_user("First", "first@first.com"))
            .await
            .unwrap();
    }

    assert_eq!(count_users(&db).await, 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_explicit_commit_persists() {
    let db = TestDatabase::new().await;

    let mut uow = db.factory().begin().await.unwrap();
    uow.users()
        .create_user(new_user("First", "first@first.com"))
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let mut uow = db.factory().begin().await.unwrap();
    let found = uow
        .repository::<User>()
        .get_by_filter_one_or_none(Fields::new().with(UserColumn::Email, "first@first.com"))
        .await
        .unwrap();
    assert!(found.is_some());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concrete_task_lifecycle() {
    let db = TestDatabase::new().await;
    let factory = db.factory();

    let mut uow = factory.begin().await.unwrap();
    let author = uow
        .users()
        .create_user(new_user("First", "first@first.com"))
        .await
        .unwrap();
    let task = uow
        .tasks()
        .create_task(new_task("First", TaskStatus::Todo, author.id))
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let mut uow = factory.begin().await.unwrap();
    let listed = uow.tasks().get_all(Default::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].task.title, "First");
    assert_eq!(listed[0].task.status, TaskStatus::Todo);
    assert!(listed[0].watchers.is_empty());
    assert!(listed[0].executors.is_empty());

    let updated = uow
        .tasks()
        .update(
            task.id,
            taskboard_repository::TaskChanges {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.title, "First");

    assert!(uow.tasks().delete_by_id(task.id).await.unwrap());
    assert!(uow.tasks().get_by_id(task.id).await.unwrap().is_none());
    uow.commit().await.unwrap();
}
