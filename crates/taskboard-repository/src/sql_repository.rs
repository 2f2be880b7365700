//! Generic CRUD repository over one entity table.

use crate::entity::{Column, Entity, Fields, Identified, SqlValue};
use crate::error::RepositoryError;
use sqlx::{PgConnection, Postgres, QueryBuilder};
use std::marker::PhantomData;
use tracing::debug;
use uuid::Uuid;

type Result<T> = std::result::Result<T, RepositoryError>;

/// CRUD primitives for one entity type, bound to the connection of the
/// enclosing unit of work.
///
/// Every statement is built with [`QueryBuilder`] and every value is bound
/// as a parameter. Driver errors are translated into [`RepositoryError`]
/// here and nowhere else.
pub struct SqlRepository<'c, E: Entity> {
    conn: &'c mut PgConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<'c, E: Entity> SqlRepository<'c, E> {
    /// Binds a repository to a connection (usually a transaction).
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    /// Reborrows the underlying connection for hand-written queries.
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut *self.conn
    }

    /// Inserts one record.
    pub async fn add_one(&mut self, fields: Fields<E>) -> Result<()> {
        let mut qb = insert_statement::<E>(fields);
        debug!(table = E::TABLE, sql = qb.sql(), "add_one");
        qb.build().execute(&mut *self.conn).await?;
        Ok(())
    }

    /// Inserts one record and returns it as persisted, including
    /// server-side defaults.
    pub async fn add_one_and_get_obj(&mut self, fields: Fields<E>) -> Result<E> {
        let mut qb = insert_statement::<E>(fields);
        qb.push(" RETURNING ").push(E::column_list());
        debug!(table = E::TABLE, sql = qb.sql(), "add_one_and_get_obj");
        let row = qb.build_query_as::<E>().fetch_one(&mut *self.conn).await?;
        Ok(row)
    }

    /// Inserts many records in one statement. An empty batch is a no-op.
    ///
    /// Every row must set the same columns in the same order.
    pub async fn bulk_add(&mut self, rows: Vec<Fields<E>>) -> Result<u64> {
        let Some(first) = rows.first() else {
            return Ok(0);
        };
        let columns: Vec<&'static str> = first.columns().collect();
        if rows.iter().any(|r| !r.columns().eq(columns.iter().copied())) {
            return Err(RepositoryError::Storage(format!(
                "bulk insert into {} requires identical column sets",
                E::TABLE
            )));
        }

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "INSERT INTO {} ({}) VALUES ",
            E::TABLE,
            columns.join(", ")
        ));
        for (i, row) in rows.into_iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push("(");
            for (j, (_, value)) in row.into_entries().into_iter().enumerate() {
                if j > 0 {
                    qb.push(", ");
                }
                value.push_bind(&mut qb);
            }
            qb.push(")");
        }

        debug!(table = E::TABLE, sql = qb.sql(), "bulk_add");
        let result = qb.build().execute(&mut *self.conn).await?;
        Ok(result.rows_affected())
    }

    /// Exact-match lookup returning the single match.
    ///
    /// Zero matches is `Ok(None)`. Several matches is
    /// [`RepositoryError::NotFound`], since the caller expected at most one.
    pub async fn get_by_filter_one_or_none(&mut self, filter: Fields<E>) -> Result<Option<E>> {
        let mut qb = select_statement::<E>(filter);
        qb.push(" LIMIT 2");
        debug!(table = E::TABLE, sql = qb.sql(), "get_by_filter_one_or_none");
        let mut rows = qb.build_query_as::<E>().fetch_all(&mut *self.conn).await?;
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            _ => Err(RepositoryError::NotFound(format!(
                "expected at most one row in {}, found several",
                E::TABLE
            ))),
        }
    }

    /// Exact-match lookup returning every match.
    pub async fn get_by_filter_all(&mut self, filter: Fields<E>) -> Result<Vec<E>> {
        let mut qb = select_statement::<E>(filter);
        debug!(table = E::TABLE, sql = qb.sql(), "get_by_filter_all");
        let rows = qb.build_query_as::<E>().fetch_all(&mut *self.conn).await?;
        Ok(rows)
    }

    /// Deletes every matching record and returns how many were removed.
    ///
    /// An empty filter deletes every record of the table.
    pub async fn delete_by_filter(&mut self, filter: Fields<E>) -> Result<u64> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("DELETE FROM {}", E::TABLE));
        filter.push_where(&mut qb);
        debug!(table = E::TABLE, sql = qb.sql(), "delete_by_filter");
        let result = qb.build().execute(&mut *self.conn).await?;
        Ok(result.rows_affected())
    }

    /// Deletes every record of the table.
    pub async fn delete_all(&mut self) -> Result<u64> {
        self.delete_by_filter(Fields::new()).await
    }
}

impl<'c, E: Identified> SqlRepository<'c, E> {
    /// Inserts one record and returns its generated identifier.
    pub async fn add_one_and_get_id(&mut self, fields: Fields<E>) -> Result<E::Id> {
        let mut qb = insert_statement::<E>(fields);
        qb.push(" RETURNING ").push(E::ID.name());
        debug!(table = E::TABLE, sql = qb.sql(), "add_one_and_get_id");
        let id: Uuid = qb
            .build_query_scalar::<Uuid>()
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(E::Id::from(id))
    }

    /// Sets only the given columns on the record with this identifier.
    ///
    /// Returns `Ok(None)` when no such record exists. With no assignments
    /// nothing is written and the current record is returned.
    pub async fn update_one_by_id(&mut self, id: E::Id, fields: Fields<E>) -> Result<Option<E>> {
        if fields.is_empty() {
            return self
                .get_by_filter_one_or_none(Fields::new().with(E::ID, SqlValue::Uuid(id.into())))
                .await;
        }

        let key: Uuid = id.into();
        let mut qb = QueryBuilder::<Postgres>::new(format!("UPDATE {}", E::TABLE));
        fields.push_assignments(&mut qb);
        qb.push(" WHERE ")
            .push(E::ID.name())
            .push(" = ")
            .push_bind(key)
            .push(" RETURNING ")
            .push(E::column_list());
        debug!(table = E::TABLE, %id, sql = qb.sql(), "update_one_by_id");
        let row = qb
            .build_query_as::<E>()
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    /// Deletes every record whose identifier is in `ids`.
    pub async fn delete_by_ids(&mut self, ids: &[E::Id]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = ids.iter().map(|id| (*id).into()).collect();
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "DELETE FROM {} WHERE {} = ANY(",
            E::TABLE,
            E::ID.name()
        ));
        qb.push_bind(ids).push(")");
        debug!(table = E::TABLE, sql = qb.sql(), "delete_by_ids");
        let result = qb.build().execute(&mut *self.conn).await?;
        Ok(result.rows_affected())
    }
}

fn insert_statement<E: Entity>(fields: Fields<E>) -> QueryBuilder<'static, Postgres> {
    if fields.is_empty() {
        return QueryBuilder::new(format!("INSERT INTO {} DEFAULT VALUES", E::TABLE));
    }

    let mut qb = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) VALUES (",
        E::TABLE,
        fields.columns().collect::<Vec<_>>().join(", ")
    ));
    for (i, (_, value)) in fields.into_entries().into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        value.push_bind(&mut qb);
    }
    qb.push(")");
    qb
}

fn select_statement<E: Entity>(filter: Fields<E>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", E::column_list(), E::TABLE));
    filter.push_where(&mut qb);
    qb
}
