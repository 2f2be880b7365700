//! # Taskboard Repository
//!
//! Data access for users and tasks, layered as:
//!
//! ```text
//! Service
//!   ↓  UnitOfWorkFactory::run      (one transaction per operation)
//! UnitOfWork                       (owns the transaction)
//!   ↓  users() / tasks()
//! UserRepository / TaskRepository  (entity queries, UserError / TaskError)
//!   ↓  Deref
//! SqlRepository<E>                 (generic CRUD, RepositoryError)
//!   ↓
//! PostgreSQL
//! ```
//!
//! `sqlx::Error` is inspected only in [`error`]; every layer above sees the
//! repository error kinds.

pub mod entity;
pub mod error;
pub mod pool;
pub mod sql_repository;
pub mod task_repository;
pub mod unit_of_work;
pub mod user_repository;

pub use entity::*;
pub use error::*;
pub use pool::*;
pub use sql_repository::*;
pub use task_repository::*;
pub use unit_of_work::*;
pub use user_repository::*;
