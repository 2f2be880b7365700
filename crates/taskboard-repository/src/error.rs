//! Repository error kinds.
//!
//! The generic repository is the only place that inspects `sqlx::Error`.
//! Entity repositories narrow [`RepositoryError`] into [`TaskError`] and
//! [`UserError`]; nothing above this crate sees a storage-engine error type.

use sqlx::error::ErrorKind;
use taskboard_core::{TaskId, TaskboardError};
use thiserror::Error;

/// Generic error kinds produced by [`SqlRepository`](crate::SqlRepository).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A uniqueness, referential, not-null or check constraint was violated.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// A query expecting at most one row matched none or several.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other storage failure (connection, protocol, decoding).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound("no rows returned".to_string()),
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => Self::Integrity(db_err.message().to_string()),
                _ => Self::Storage(err.to_string()),
            },
            _ => Self::Storage(err.to_string()),
        }
    }
}

impl From<RepositoryError> for TaskboardError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Integrity(message) => Self::InvalidInput(message),
            RepositoryError::NotFound(message) => Self::NotFound(message),
            RepositoryError::Storage(message) => Self::Database(message),
        }
    }
}

/// Task-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The task data violates a constraint, e.g. the author does not exist.
    #[error("invalid task data: {0}")]
    Invalid(String),

    /// No task with this identifier exists.
    #[error("task {0} does not exist")]
    NoTask(TaskId),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<RepositoryError> for TaskError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Integrity(message) => Self::Invalid(message),
            RepositoryError::NotFound(message) | RepositoryError::Storage(message) => {
                Self::Storage(message)
            }
        }
    }
}

/// User-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// Duplicate email or otherwise invalid user data.
    #[error("cannot create user: {0}")]
    Create(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<RepositoryError> for UserError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Integrity(message) => Self::Create(message),
            RepositoryError::NotFound(message) | RepositoryError::Storage(message) => {
                Self::Storage(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::DatabaseError;
    use std::error::Error as StdError;

    /// Minimal stand-in for a driver error with a fixed kind.
    #[derive(Debug, Error)]
    #[error("{message}")]
    struct FakeDatabaseError {
        message: String,
        kind: ErrorKind,
    }

    impl DatabaseError for FakeDatabaseError {
        fn message(&self) -> &str {
            &self.message
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.kind {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                ErrorKind::NotNullViolation => ErrorKind::NotNullViolation,
                ErrorKind::CheckViolation => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(kind: ErrorKind, message: &str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDatabaseError {
            message: message.to_string(),
            kind,
        }))
    }

    #[test]
    fn test_constraint_violations_become_integrity() {
        for kind in [
            ErrorKind::UniqueViolation,
            ErrorKind::ForeignKeyViolation,
            ErrorKind::NotNullViolation,
            ErrorKind::CheckViolation,
        ] {
            let err = RepositoryError::from(db_error(kind, "violates constraint"));
            assert_eq!(err, RepositoryError::Integrity("violates constraint".to_string()));
        }
    }

    #[test]
    fn test_other_database_errors_become_storage() {
        let err = RepositoryError::from(db_error(ErrorKind::Other, "syntax error"));
        assert!(matches!(err, RepositoryError::Storage(_)));
    }

    #[test]
    fn test_row_not_found_becomes_not_found() {
        let err = RepositoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[test]
    fn test_connection_failures_become_storage() {
        let err = RepositoryError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Storage(_)));
    }

    #[test]
    fn test_task_error_relabeling() {
        let integrity = RepositoryError::Integrity("fk".to_string());
        assert_eq!(TaskError::from(integrity), TaskError::Invalid("fk".to_string()));

        let storage = RepositoryError::Storage("down".to_string());
        assert_eq!(TaskError::from(storage), TaskError::Storage("down".to_string()));
    }

    #[test]
    fn test_user_error_relabeling() {
        let integrity = RepositoryError::Integrity("duplicate key".to_string());
        assert_eq!(
            UserError::from(integrity),
            UserError::Create("duplicate key".to_string())
        );
    }

    #[test]
    fn test_repository_error_into_service_error() {
        let err: TaskboardError = RepositoryError::Storage("down".to_string()).into();
        assert_eq!(err.status_code(), 500);

        let err: TaskboardError = RepositoryError::Integrity("dup".to_string()).into();
        assert_eq!(err.status_code(), 400);
    }
}
