//! Table metadata and column/value pairs consumed by the generic repository.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::fmt;
use std::marker::PhantomData;
use taskboard_core::{Executor, Task, TaskId, TaskStatus, User, UserId, Watcher};
use uuid::Uuid;

/// A column of an entity's table.
pub trait Column: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Column name as it appears in SQL.
    fn name(self) -> &'static str;
}

/// A record stored in one table.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    /// Typed column names for this table.
    type Column: Column;

    /// Table name.
    const TABLE: &'static str;

    /// Every column, in the order used for `SELECT` and `RETURNING` lists.
    const COLUMNS: &'static [&'static str];

    /// Comma-separated column list.
    fn column_list() -> String {
        Self::COLUMNS.join(", ")
    }
}

/// An entity with a single-column primary key named `id`.
pub trait Identified: Entity {
    type Id: Copy + fmt::Display + From<Uuid> + Into<Uuid> + Send + Sync;

    /// The primary-key column.
    const ID: Self::Column;
}

/// A value bound as a statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Uuid(Uuid),
    NullableUuid(Option<Uuid>),
    Text(String),
    NullableText(Option<String>),
    Status(TaskStatus),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    /// Returns true for a SQL `NULL`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::NullableUuid(None) | Self::NullableText(None))
    }

    pub(crate) fn push_bind(self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::Uuid(v) => builder.push_bind(v),
            Self::NullableUuid(v) => builder.push_bind(v),
            Self::Text(v) => builder.push_bind(v),
            Self::NullableText(v) => builder.push_bind(v),
            Self::Status(v) => builder.push_bind(v),
            Self::Timestamp(v) => builder.push_bind(v),
        };
    }
}

impl From<Uuid> for SqlValue {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<UserId> for SqlValue {
    fn from(v: UserId) -> Self {
        Self::Uuid(v.into_inner())
    }
}

impl From<TaskId> for SqlValue {
    fn from(v: TaskId) -> Self {
        Self::Uuid(v.into_inner())
    }
}

impl From<Option<UserId>> for SqlValue {
    fn from(v: Option<UserId>) -> Self {
        Self::NullableUuid(v.map(UserId::into_inner))
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Option<String>> for SqlValue {
    fn from(v: Option<String>) -> Self {
        Self::NullableText(v)
    }
}

impl From<TaskStatus> for SqlValue {
    fn from(v: TaskStatus) -> Self {
        Self::Status(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

/// Ordered column/value pairs for one entity.
///
/// Used as insert values, as update assignments, and as exact-match
/// predicates. Predicate pairs compose with `AND`; an empty set matches
/// every row. Setting a column twice keeps the last value.
pub struct Fields<E: Entity> {
    entries: Vec<(E::Column, SqlValue)>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Fields<E> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// Adds a pair, builder style.
    #[must_use]
    pub fn with(mut self, column: E::Column, value: impl Into<SqlValue>) -> Self {
        self.set(column, value);
        self
    }

    /// Adds or replaces a pair.
    pub fn set(&mut self, column: E::Column, value: impl Into<SqlValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(c, _)| c.name())
    }

    /// Value bound for a column, if present.
    #[must_use]
    pub fn get(&self, column: E::Column) -> Option<&SqlValue> {
        self.entries.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    pub(crate) fn into_entries(self) -> Vec<(E::Column, SqlValue)> {
        self.entries
    }

    /// Appends ` WHERE a = $1 AND b IS NULL ...`; nothing when empty.
    pub(crate) fn push_where(self, builder: &mut QueryBuilder<'_, Postgres>) {
        for (i, (column, value)) in self.entries.into_iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            builder.push(column.name());
            if value.is_null() {
                builder.push(" IS NULL");
            } else {
                builder.push(" = ");
                value.push_bind(builder);
            }
        }
    }

    /// Appends ` SET a = $1, b = $2 ...`.
    pub(crate) fn push_assignments(self, builder: &mut QueryBuilder<'_, Postgres>) {
        for (i, (column, value)) in self.entries.into_iter().enumerate() {
            builder.push(if i == 0 { " SET " } else { ", " });
            builder.push(column.name());
            builder.push(" = ");
            value.push_bind(builder);
        }
    }
}

impl<E: Entity> Default for Fields<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Clone for Fields<E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> fmt::Debug for Fields<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(c, v)| (c.name(), v)))
            .finish()
    }
}

impl<E: Entity> PartialEq for Fields<E> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

// ---- users ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserColumn {
    Id,
    FullName,
    Email,
    CreatedAt,
}

impl Column for UserColumn {
    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::CreatedAt => "created_at",
        }
    }
}

impl Entity for User {
    type Column = UserColumn;
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["id", "full_name", "email", "created_at"];
}

impl Identified for User {
    type Id = UserId;
    const ID: UserColumn = UserColumn::Id;
}

// ---- tasks ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskColumn {
    Id,
    Title,
    Description,
    Status,
    CreatedAt,
    AuthorId,
    AssigneeId,
}

impl Column for TaskColumn {
    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::CreatedAt => "created_at",
            Self::AuthorId => "author_id",
            Self::AssigneeId => "assignee_id",
        }
    }
}

impl Entity for Task {
    type Column = TaskColumn;
    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "status",
        "created_at",
        "author_id",
        "assignee_id",
    ];
}

impl Identified for Task {
    type Id = TaskId;
    const ID: TaskColumn = TaskColumn::Id;
}

// ---- watcher / executor join tables ----

/// Columns shared by the two task/user join tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipColumn {
    TaskId,
    UserId,
}

impl Column for MembershipColumn {
    fn name(self) -> &'static str {
        match self {
            Self::TaskId => "task_id",
            Self::UserId => "user_id",
        }
    }
}

impl Entity for Watcher {
    type Column = MembershipColumn;
    const TABLE: &'static str = "watchers";
    const COLUMNS: &'static [&'static str] = &["task_id", "user_id"];
}

impl Entity for Executor {
    type Column = MembershipColumn;
    const TABLE: &'static str = "executors";
    const COLUMNS: &'static [&'static str] = &["task_id", "user_id"];
}
