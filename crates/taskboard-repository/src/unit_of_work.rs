//! Unit of work: one transaction shared by the entity repositories.

use crate::entity::Entity;
use crate::error::RepositoryError;
use crate::sql_repository::SqlRepository;
use crate::task_repository::TaskRepository;
use crate::user_repository::UserRepository;
use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, warn};

/// One open transaction and the repositories bound to it.
///
/// Repositories are borrowed views over the transaction's connection, so at
/// most one can be in use at a time and none can outlive the unit of work.
/// Dropping a unit of work without calling [`commit`](Self::commit) rolls
/// the transaction back when the connection returns to the pool.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    /// Checks out a connection and opens a transaction.
    pub async fn begin(pool: &PgPool) -> Result<Self, RepositoryError> {
        let tx = pool.begin().await?;
        debug!("Unit of work started");
        Ok(Self { tx })
    }

    /// User repository bound to this transaction.
    pub fn users(&mut self) -> UserRepository<'_> {
        UserRepository::new(&mut self.tx)
    }

    /// Task repository bound to this transaction.
    pub fn tasks(&mut self) -> TaskRepository<'_> {
        TaskRepository::new(&mut self.tx)
    }

    /// Generic repository for any entity, bound to this transaction.
    pub fn repository<E: Entity>(&mut self) -> SqlRepository<'_, E> {
        SqlRepository::new(&mut self.tx)
    }

    pub async fn commit(self) -> Result<(), RepositoryError> {
        self.tx.commit().await?;
        debug!("Unit of work committed");
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), RepositoryError> {
        self.tx.rollback().await?;
        debug!("Unit of work rolled back");
        Ok(())
    }
}

/// Opens units of work against a pool.
#[derive(Clone, Debug)]
pub struct UnitOfWorkFactory {
    pool: PgPool,
}

impl UnitOfWorkFactory {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a unit of work that the caller must commit explicitly.
    pub async fn begin(&self) -> Result<UnitOfWork, RepositoryError> {
        UnitOfWork::begin(&self.pool).await
    }

    /// Runs `operation` inside one unit of work.
    ///
    /// Commits when the operation returns `Ok` and rolls back when it
    /// returns `Err`. If the returned future is dropped before completion
    /// the transaction is rolled back as well, so a partial commit is not
    /// possible.
    ///
    /// ```ignore
    /// let user = factory
    ///     .run(|uow| Box::pin(async move { uow.users().create_user(new_user).await }))
    ///     .await?;
    /// ```
    pub async fn run<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: for<'u> FnOnce(&'u mut UnitOfWork) -> BoxFuture<'u, Result<T, E>> + Send,
        E: From<RepositoryError> + std::fmt::Display + Send,
        T: Send,
    {
        let mut uow = self.begin().await?;
        let outcome = operation(&mut uow).await;
        match outcome {
            Ok(value) => {
                uow.commit().await?;
                Ok(value)
            }
            Err(err) => {
                debug!("Rolling back unit of work: {}", err);
                if let Err(rollback_err) = uow.rollback().await {
                    warn!("Rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}
